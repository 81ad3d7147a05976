use std::path::PathBuf;

/// Failure to load or validate a `GenerateConfig`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown mode `{0}`")]
    UnknownMode(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}
