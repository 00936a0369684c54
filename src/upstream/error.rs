pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure of a single call to the note service.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// Connection, timeout, or body read failure.
    #[error("note service unavailable at {url}: {source}")]
    Unavailable {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("note service request failed with status {status}: {url}")]
    Status { status: u16, url: String },

    #[error("invalid upstream URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: BoxError,
    },

    /// An id that cannot stand as a single path segment.
    #[error("refusing to request note service resource with id {id:?}")]
    InvalidId { id: String },

    #[error("malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl UpstreamError {
    pub fn unavailable(url: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Unavailable {
            url: url.into(),
            source: source.into(),
        }
    }

    pub fn invalid_url(url: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            source: source.into(),
        }
    }

    /// Status code for [`UpstreamError::Status`], if that is what this is.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
