//! onedrive-immich-diff — compare a OneDrive folder against an Immich
//! library by filename and download whatever Immich is missing.
//!
//! The OneDrive listing is fetched through the Microsoft Graph API (with a
//! local JSON snapshot to spare repeated enumeration), the Immich inventory
//! through its paged metadata search. The difference is computed on exact
//! filenames and downloaded sequentially with per-file and overall
//! progress.

#![warn(clippy::all)]

mod cli;
mod config;
mod diff;
mod download;
mod error;
mod immich;
mod onedrive;
mod transport;

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use indicatif::HumanBytes;
use tracing_subscriber::EnvFilter;

use cli::{Cli, LogLevel};
use config::Config;
use error::Error;
use immich::ImmichClient;
use onedrive::DriveClient;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.log_level {
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    let config = match Config::from_cli(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: {e}");
            return ExitCode::from(1);
        }
    };

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::from(1)
        }
    }
}

async fn run(config: Config) -> Result<(), Error> {
    let drive = DriveClient::new(config.graph.clone());
    let immich = ImmichClient::new(config.immich.clone());

    println!("Getting OneDrive listing for '{}'...", config.graph.drive_folder);
    let files = drive.list_files(config.refresh).await?;
    println!("Found {} files in OneDrive.", files.len());

    println!(
        "Fetching Immich assets in batches of {}...",
        config.immich.page_size
    );
    let assets = immich.list_assets().await?;
    println!("Found {} assets in Immich.", assets.len());

    println!("Comparing OneDrive and Immich filenames...");
    let target_names = diff::target_name_set(&assets);
    let missing = diff::missing_files(&files, &target_names);

    if missing.is_empty() {
        println!("No missing files; every OneDrive filename appears in Immich.");
        return Ok(());
    }

    println!(
        "Found {} file(s) in OneDrive that are not in Immich:",
        missing.len()
    );
    for file in &missing {
        println!(" - {}", file.name);
    }

    let plan = download::plan(missing);
    println!();
    println!("Total download size: {}", HumanBytes(plan.total_bytes));

    if !config.assume_yes {
        let question = format!(
            "Download these missing files to {}?",
            config.download_dir.display()
        );
        if !confirm(&question)? {
            println!("Okay, not downloading anything.");
            return Ok(());
        }
    }

    println!();
    println!("Starting downloads...");
    let options = download::DownloadOptions {
        destination: config.download_dir.clone(),
        no_progress_bar: config.no_progress_bar,
    };
    let summary = download::execute(&drive, &plan, &options).await?;

    println!();
    println!(
        "Done: {} downloaded, {} already present, {} failed.",
        summary.downloaded, summary.already_present, summary.failed
    );
    Ok(())
}

/// One yes/no question on stdin; anything but y/Y declines.
fn confirm(question: &str) -> Result<bool, Error> {
    print!("{question} [y/N]: ");
    std::io::stdout().flush()?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}
