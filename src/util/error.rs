use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackStatsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
    #[error("failed to decode track: {0}")]
    TrackDecode(#[from] serde_json::Error),
    #[error("failed to encode statistics: {0}")]
    Output(serde_json::Error),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, TrackStatsError>;
