use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "onedrive-immich-diff",
    about = "Find photos in a OneDrive folder that are missing from an Immich library"
)]
pub struct Cli {
    /// Microsoft Graph access token.
    /// WARNING: passing via --access-token is visible in process listings.
    /// Prefer the ONEDRIVE_ACCESS_TOKEN environment variable instead.
    #[arg(long, env = "ONEDRIVE_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Microsoft Graph API base URL
    #[arg(long, default_value = "https://graph.microsoft.com/v1.0")]
    pub graph_base_url: String,

    /// OneDrive folder to reconcile, as a path under the drive root
    #[arg(long, default_value = "Pictures/Camera Roll")]
    pub drive_folder: String,

    /// Immich server base URL (e.g. https://pics.example.com)
    #[arg(long, env = "IMMICH_BASE_URL")]
    pub immich_base_url: Option<String>,

    /// Immich API key
    #[arg(long, env = "IMMICH_API_KEY", hide_env_values = true)]
    pub immich_api_key: Option<String>,

    /// Immich search page size
    #[arg(long, env = "IMMICH_PAGE_SIZE", default_value_t = 500)]
    pub page_size: u32,

    /// Local directory for downloaded files
    #[arg(short = 'd', long, default_value = "./immich_missing_files")]
    pub download_dir: String,

    /// OneDrive snapshot cache location
    #[arg(long, default_value = "./onedrive_camera_roll_cache.json")]
    pub cache_file: String,

    /// Disable the OneDrive snapshot cache
    #[arg(long)]
    pub no_cache: bool,

    /// Re-fetch the OneDrive listing even when a snapshot exists
    #[arg(long)]
    pub refresh: bool,

    /// Download missing files without asking
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Disable progress bars
    #[arg(long)]
    pub no_progress_bar: bool,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}
