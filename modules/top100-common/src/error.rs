use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Top100Error>;

#[derive(Error, Debug)]
pub enum Top100Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Snapshot I/O error at {}: {source}", path.display())]
    Snapshot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Snapshot at {} is not a JSON array of objects: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Remote task error: {0}")]
    Remote(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}
