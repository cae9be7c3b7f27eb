//! Error type shared by the core modules.

use crate::lifetime::Cancelled;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("cannot serialize config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("xdg directories unavailable: {0}")]
    Xdg(#[from] xdg::BaseDirectoriesError),

    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("invalid mod archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error(transparent)]
    Cancelled(#[from] Cancelled),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True when the error came from a cancelled lifetime rather than a real failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled(_))
    }
}
