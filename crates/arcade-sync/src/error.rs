//! Error types for arcade-sync

/// Result type for arcade-sync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while fetching or installing content
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested identifier is absent from the catalog, listing, or
    /// store.
    #[error("Content not found: {name}")]
    NotFound { name: String },

    /// The remote endpoint answered with a non-success status.
    #[error("Request to {url} failed: HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// The network transfer itself failed.
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Reading the content stream failed mid-transfer.
    #[error("Failed to read {item}: {source}")]
    Stream {
        item: String,
        #[source]
        source: std::io::Error,
    },

    /// Installing the item into the local tree failed.
    #[error("Failed to copy {item}: {source}")]
    Install {
        item: String,
        #[source]
        source: arcade_fs::Error,
    },
}

impl Error {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    pub fn stream(item: impl Into<String>, source: std::io::Error) -> Self {
        Self::Stream {
            item: item.into(),
            source,
        }
    }

    /// The item the error concerns, when it names one.
    pub fn item(&self) -> Option<&str> {
        match self {
            Self::NotFound { name } => Some(name),
            Self::Stream { item, .. } | Self::Install { item, .. } => Some(item),
            Self::HttpStatus { .. } | Self::Request { .. } => None,
        }
    }
}
