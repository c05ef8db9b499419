use thiserror::Error;

/// Errors raised by the non-UI layers (settings, gallery loading, fetches).
///
/// None of these are fatal: the UI turns every one of them into a log line
/// and, where the user triggered the operation, an error notification.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered, but not with a 2xx status
    #[error("server responded with status {0}")]
    Status(u16),

    #[error("invalid image URL `{0}`")]
    InvalidUrl(String),

    #[error("could not determine the user configuration directory")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, Error>;
