use thiserror::Error;

/// Crate-wide error taxonomy.
///
/// Components never terminate the process themselves; every failure is
/// propagated here and `main` decides the exit status. Cache problems and
/// rejected per-file downloads are deliberately *not* variants — they are
/// logged and recovered from where they occur.
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("{service} API error: HTTP {status}: {body}")]
    Api {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
