use std::path::PathBuf;

/// Errors raised at the edges of the crate. Building a presence never fails;
/// only loading configuration from disk can.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("No configuration directory available on this platform")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, Error>;
