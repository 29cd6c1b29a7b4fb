use std::path::PathBuf;

use crate::cli::Cli;
use crate::error::{Error, Result};

/// Connection settings for the Microsoft Graph listing and content endpoints.
#[derive(Clone)]
pub struct GraphConfig {
    pub base_url: String,
    pub access_token: String,
    pub drive_folder: String,
    pub use_cache: bool,
    pub cache_file: PathBuf,
}

impl std::fmt::Debug for GraphConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &"<redacted>")
            .field("drive_folder", &self.drive_folder)
            .field("use_cache", &self.use_cache)
            .field("cache_file", &self.cache_file)
            .finish()
    }
}

/// Connection settings for the Immich search endpoint.
#[derive(Clone)]
pub struct ImmichConfig {
    pub base_url: String,
    pub api_key: String,
    pub page_size: u32,
}

impl std::fmt::Debug for ImmichConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImmichConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("page_size", &self.page_size)
            .finish()
    }
}

/// Application configuration, assembled from CLI flags and environment
/// variables before any network activity.
#[derive(Debug, Clone)]
pub struct Config {
    pub graph: GraphConfig,
    pub immich: ImmichConfig,
    pub download_dir: PathBuf,
    pub refresh: bool,
    pub assume_yes: bool,
    pub no_progress_bar: bool,
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

/// Reject absent or empty credentials before any request is issued.
fn require(value: Option<String>, what: &str, hint: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::Config(format!("{what} is not set; {hint}"))),
    }
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let access_token = require(
            cli.access_token,
            "OneDrive access token",
            "set ONEDRIVE_ACCESS_TOKEN or pass --access-token",
        )?;
        let immich_base_url = require(
            cli.immich_base_url,
            "Immich base URL",
            "set IMMICH_BASE_URL or pass --immich-base-url",
        )?;
        let immich_api_key = require(
            cli.immich_api_key,
            "Immich API key",
            "set IMMICH_API_KEY or pass --immich-api-key",
        )?;

        Ok(Self {
            graph: GraphConfig {
                base_url: cli.graph_base_url.trim_end_matches('/').to_string(),
                access_token,
                drive_folder: cli.drive_folder.trim_matches('/').to_string(),
                use_cache: !cli.no_cache,
                cache_file: expand_tilde(&cli.cache_file),
            },
            immich: ImmichConfig {
                base_url: immich_base_url.trim_end_matches('/').to_string(),
                api_key: immich_api_key,
                page_size: cli.page_size,
            },
            download_dir: expand_tilde(&cli.download_dir),
            refresh: cli.refresh,
            assume_yes: cli.yes,
            no_progress_bar: cli.no_progress_bar,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn make_cli(extra: &[&str]) -> Cli {
        let mut args = vec![
            "onedrive-immich-diff",
            "--access-token",
            "graph-bearer-secret",
            "--immich-base-url",
            "https://pics.example.com/",
            "--immich-api-key",
            "immich-key-secret",
        ];
        args.extend_from_slice(extra);
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_expand_tilde_with_home() {
        let result = expand_tilde("~/photos");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(result, home.join("photos"));
        }
    }

    #[test]
    fn test_expand_tilde_no_prefix() {
        assert_eq!(
            expand_tilde("/absolute/path"),
            PathBuf::from("/absolute/path")
        );
        assert_eq!(expand_tilde("relative/path"), PathBuf::from("relative/path"));
    }

    #[test]
    fn test_from_cli_defaults() {
        let config = Config::from_cli(make_cli(&[])).unwrap();
        assert_eq!(config.graph.base_url, "https://graph.microsoft.com/v1.0");
        assert_eq!(config.graph.drive_folder, "Pictures/Camera Roll");
        assert!(config.graph.use_cache);
        assert_eq!(config.immich.page_size, 500);
        assert!(!config.refresh);
        assert!(!config.assume_yes);
    }

    #[test]
    fn test_from_cli_trims_trailing_slash() {
        let config = Config::from_cli(make_cli(&[])).unwrap();
        assert_eq!(config.immich.base_url, "https://pics.example.com");
    }

    #[test]
    fn test_from_cli_no_cache_flag() {
        let config = Config::from_cli(make_cli(&["--no-cache"])).unwrap();
        assert!(!config.graph.use_cache);
    }

    #[test]
    fn test_missing_access_token_is_config_error() {
        let cli = Cli::try_parse_from([
            "onedrive-immich-diff",
            "--immich-base-url",
            "https://pics.example.com",
            "--immich-api-key",
            "key",
        ])
        .unwrap();
        // Only meaningful when the variable isn't set in the test environment.
        if std::env::var("ONEDRIVE_ACCESS_TOKEN").is_err() {
            let err = Config::from_cli(cli).unwrap_err();
            assert!(matches!(err, Error::Config(_)));
            assert!(err.to_string().contains("ONEDRIVE_ACCESS_TOKEN"));
        }
    }

    #[test]
    fn test_empty_api_key_is_config_error() {
        let cli = Cli::try_parse_from([
            "onedrive-immich-diff",
            "--access-token",
            "tok",
            "--immich-base-url",
            "https://pics.example.com",
            "--immich-api-key",
            "  ",
        ])
        .unwrap();
        let err = Config::from_cli(cli).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let config = Config::from_cli(make_cli(&[])).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("graph-bearer-secret"));
        assert!(!rendered.contains("immich-key-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
