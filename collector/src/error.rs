use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream responded with {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Analysis task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("No steam ids to fetch careers for")]
    NoSteamIds,

    #[error("No API token, pass --token or set STRATZ_API_TOKEN")]
    MissingToken,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io<P>(path: P) -> impl FnOnce(std::io::Error) -> Self
    where
        P: Into<PathBuf>,
    {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}
