/// Errors raised while fetching or interpreting the remote listing.
use thiserror::Error;

/// Why a snapshot update failed.
///
/// `Fetch` and `Status` mean the endpoint could not be used at all;
/// `Parse` means it answered with something that is not a tree listing.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to reach {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("listing body is not a tree listing: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SourceError {
    /// Network failure or non-success status.
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::Status { .. })
    }

    /// The body could not be interpreted.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}
