//! Download engine — sequential streaming downloads of the missing files,
//! with per-file and aggregate byte progress.
//!
//! Planning and execution are split: `plan` computes the work list and
//! total byte count without side effects, so the caller can show it and
//! ask for confirmation before `execute` touches the network or the disk.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::onedrive::types::DriveItem;
use crate::onedrive::DriveClient;

/// Statuses accepted from the content endpoint. Redirects count as
/// success because the transport may surface them before following.
const ACCEPTED_STATUSES: [u16; 2] = [200, 302];

/// What happened to a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Downloaded,
    AlreadyPresent,
    Rejected,
}

/// The work list for one download batch. Built without side effects.
#[derive(Debug)]
pub struct DownloadPlan {
    pub files: Vec<DriveItem>,
    pub total_bytes: u64,
}

pub fn plan(missing: Vec<DriveItem>) -> DownloadPlan {
    let total_bytes = missing.iter().map(|f| f.size).sum();
    DownloadPlan {
        files: missing,
        total_bytes,
    }
}

#[derive(Debug)]
pub struct DownloadOptions {
    pub destination: PathBuf,
    pub no_progress_bar: bool,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    pub downloaded: usize,
    pub already_present: usize,
    pub failed: usize,
}

fn progress_target(no_progress_bar: bool) -> ProgressDrawTarget {
    if no_progress_bar || !std::io::stdout().is_terminal() {
        ProgressDrawTarget::hidden()
    } else {
        ProgressDrawTarget::stderr()
    }
}

fn overall_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "[{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta}) {msg}",
    )
    .expect("valid template")
    .progress_chars("=> ")
}

fn file_style() -> ProgressStyle {
    ProgressStyle::with_template("  {msg} [{bar:30.cyan/blue}] {bytes}/{total_bytes}")
        .expect("valid template")
        .progress_chars("=> ")
}

fn file_spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("  {msg} {bytes} ({bytes_per_sec})").expect("valid template")
}

/// Download every file in the plan, one at a time, in plan order.
///
/// Per-file rejections are logged and skipped; only transport and disk
/// failures abort the batch.
pub async fn execute(
    drive: &DriveClient,
    plan: &DownloadPlan,
    options: &DownloadOptions,
) -> Result<DownloadSummary> {
    fs::create_dir_all(&options.destination).await?;

    let multi = MultiProgress::with_draw_target(progress_target(options.no_progress_bar));
    let overall = multi.add(ProgressBar::new(plan.total_bytes));
    overall.set_style(overall_style());

    let mut summary = DownloadSummary::default();
    for item in &plan.files {
        let outcome =
            download_file(drive, item, &options.destination, &multi, Some(&overall)).await?;
        match outcome {
            FileOutcome::Downloaded => summary.downloaded += 1,
            FileOutcome::AlreadyPresent => summary.already_present += 1,
            FileOutcome::Rejected => summary.failed += 1,
        }
    }

    overall.finish_and_clear();
    Ok(summary)
}

/// Fetch one file into `destination`, named after the drive item.
///
/// A file already present at the destination counts as downloaded: the
/// aggregate bar advances by the declared size and no request is made,
/// which makes re-runs resumable. The pre-existing content is not
/// validated.
pub async fn download_file(
    drive: &DriveClient,
    item: &DriveItem,
    destination: &Path,
    multi: &MultiProgress,
    overall: Option<&ProgressBar>,
) -> Result<FileOutcome> {
    fs::create_dir_all(destination).await?;
    let dest_path = destination.join(&item.name);

    if dest_path.exists() {
        tracing::debug!(path = %dest_path.display(), "already present, skipping");
        if let Some(overall) = overall {
            overall.inc(item.size);
        }
        return Ok(FileOutcome::AlreadyPresent);
    }

    let response = drive.fetch_content(item).await?;
    if !ACCEPTED_STATUSES.contains(&response.status) {
        let status = response.status;
        let body = response.text().await;
        multi.suspend(|| {
            tracing::warn!(status, "failed to download {}: {}", item.name, body);
        });
        // Keep the aggregate total consistent even though nothing was
        // transferred.
        if let Some(overall) = overall {
            overall.inc(item.size);
        }
        return Ok(FileOutcome::Rejected);
    }

    let file_bar = if item.size > 0 {
        let pb = multi.add(ProgressBar::new(item.size));
        pb.set_style(file_style());
        pb
    } else {
        let pb = multi.add(ProgressBar::new_spinner());
        pb.set_style(file_spinner_style());
        pb
    };
    file_bar.set_message(item.name.clone());

    let mut file = fs::File::create(&dest_path).await?;
    let mut stream = response.body;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if chunk.is_empty() {
            continue;
        }
        file.write_all(&chunk).await?;
        let len = chunk.len() as u64;
        file_bar.inc(len);
        if let Some(overall) = overall {
            overall.inc(len);
        }
    }
    file.flush().await?;

    file_bar.finish_and_clear();
    multi.remove(&file_bar);
    tracing::debug!(path = %dest_path.display(), "downloaded");
    Ok(FileOutcome::Downloaded)
}
