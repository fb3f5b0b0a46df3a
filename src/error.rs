use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no URL or video ID provided")]
    MissingInput,

    #[error("search query is required")]
    MissingQuery,

    #[error("could not extract a video ID from: {0}")]
    InvalidUrl(String),

    #[error("no captions available for video {0}")]
    NoTranscriptAvailable(String),

    #[error("could not fetch transcript: {0}")]
    TranscriptFetchFailed(String),

    /// A transcript source failed for a reason other than caption absence.
    #[error("{0}")]
    Source(String),

    #[error("selected model is currently rate limited or unavailable, please try a different model")]
    ModelUnavailable,

    #[error("{0}")]
    Upstream(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("missing {0} environment variable")]
    Config(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
