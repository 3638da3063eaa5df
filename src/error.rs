use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while fetching a single asset or preparing a run
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid font catalog: {0}")]
    Catalog(String),

    #[error("no .{extension} url found in stylesheet for {font} {label}")]
    MissingAsset {
        font: String,
        label: String,
        extension: &'static str,
    },
}

impl FetchError {
    pub fn http(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Http {
            url: url.into(),
            source,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
