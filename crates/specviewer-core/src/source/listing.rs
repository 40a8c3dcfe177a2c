/// Tree listing wire format and ingestion.
///
/// The endpoint answers with `{ "tree": [ { "path", "type", "size"? } ] }`.
/// Ingestion keeps blobs under the configured prefix, trims prefix and
/// suffix, and turns each into a [`FileEntry`].
use super::error::SourceError;
use crate::config::SourceConfig;
use crate::model::FileEntry;
use serde::Deserialize;
use tracing::warn;

/// Top-level listing body. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeListing {
    pub tree: Vec<TreeItem>,
    /// Set by the API when the listing was cut short.
    #[serde(default)]
    pub truncated: bool,
}

/// One node of the recursive listing.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeItem {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Only present for blobs. Kept as a raw number so one bad value
    /// rejects a single entry at ingestion, not the whole listing.
    #[serde(default)]
    pub size: Option<serde_json::Number>,
}

/// Node kind as reported by the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Blob,
    Tree,
    Commit,
    #[serde(other)]
    Other,
}

/// Decode a listing body.
pub fn parse_listing(body: &str) -> Result<TreeListing, SourceError> {
    Ok(serde_json::from_str(body)?)
}

/// Filter and trim listing items into file entries.
///
/// Blobs without a size are ingested with size 0. Items whose display path
/// would be empty, or whose size is negative or fractional, are skipped.
pub fn ingest(listing: &TreeListing, config: &SourceConfig) -> Vec<FileEntry> {
    listing
        .tree
        .iter()
        .filter(|item| item.kind == ItemKind::Blob)
        .filter_map(|item| {
            let rest = item.path.strip_prefix(config.prefix.as_str())?;
            let path = rest.strip_suffix(config.suffix.as_str()).unwrap_or(rest);
            if path.is_empty() || path.ends_with('/') {
                warn!("Skipping listing item with empty name: {:?}", item.path);
                return None;
            }
            let size = match &item.size {
                None => 0,
                Some(n) => match n.as_u64() {
                    Some(size) => size,
                    None => {
                        warn!("Skipping listing item with invalid size {n}: {:?}", item.path);
                        return None;
                    }
                },
            };
            Some(FileEntry::new(path, size))
        })
        .collect()
}
