/// A single spec file in the listing.
///
/// Paths are relative to the source prefix and carry no extension, e.g.
/// `aws/amplify` for `src/aws/amplify.ts`.
use compact_str::CompactString;

/// Path separator used by the remote listing.
pub const PATH_SEPARATOR: char = '/';

/// One file from the listing. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileEntry {
    path: CompactString,
    size: u64,
}

impl FileEntry {
    /// Create a new entry from a display path and a byte size.
    pub fn new(path: impl Into<CompactString>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }

    /// Display path, relative to the source prefix, without extension.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// File size in bytes as reported by the listing.
    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// First path segment when the entry lives in a subdirectory.
    ///
    /// `aws/amplify` yields `Some("aws")`, `git` yields `None`.
    pub fn top_level_dir(&self) -> Option<&str> {
        self.path
            .split_once(PATH_SEPARATOR)
            .map(|(first, _)| first)
    }

    /// Name shown inside a group: the path with the first `"{key}/"` removed.
    ///
    /// Only the first occurrence is removed, anywhere in the path; keys that
    /// do not occur leave the path unchanged (the `_rest` group).
    pub fn display_name(&self, key: &str) -> String {
        let needle = format!("{key}{PATH_SEPARATOR}");
        self.path.replacen(&needle, "", 1)
    }
}
