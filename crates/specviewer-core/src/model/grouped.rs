/// Files partitioned into groups by their top-level directory.
///
/// Groups are kept in first-discovery order so enumeration is
/// deterministic. Entries inside a group keep insertion order; sorting is
/// the view layer's job.
use super::file_entry::FileEntry;
use std::collections::HashMap;

/// Key of the group holding files that sit directly under the prefix.
pub const UNGROUPED_KEY: &str = "_rest";

/// One bucket of files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup {
    pub key: String,
    pub entries: Vec<FileEntry>,
}

/// Ordered mapping from group key to the files in that group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedFiles {
    groups: Vec<FileGroup>,
    /// key -> position in `groups`.
    index: HashMap<String, usize>,
}

impl Default for GroupedFiles {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupedFiles {
    /// An empty grouping that already contains the (empty) ungrouped bucket.
    pub fn new() -> Self {
        let mut grouped = Self {
            groups: Vec::new(),
            index: HashMap::new(),
        };
        grouped.group_mut(UNGROUPED_KEY);
        grouped
    }

    /// Append an entry to the group its path belongs to, creating the
    /// group on first use.
    pub fn insert(&mut self, entry: FileEntry) {
        let key = entry.top_level_dir().unwrap_or(UNGROUPED_KEY).to_owned();
        self.group_mut(&key).push(entry);
    }

    fn group_mut(&mut self, key: &str) -> &mut Vec<FileEntry> {
        let pos = match self.index.get(key) {
            Some(&pos) => pos,
            None => {
                self.groups.push(FileGroup {
                    key: key.to_owned(),
                    entries: Vec::new(),
                });
                let pos = self.groups.len() - 1;
                self.index.insert(key.to_owned(), pos);
                pos
            }
        };
        &mut self.groups[pos].entries
    }

    /// Entries of one group, if it exists.
    pub fn get(&self, key: &str) -> Option<&[FileEntry]> {
        self.index
            .get(key)
            .map(|&pos| self.groups[pos].entries.as_slice())
    }

    /// Iterate groups in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &FileGroup> {
        self.groups.iter()
    }

    /// Number of groups, including an empty ungrouped bucket.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of entries across all groups.
    pub fn file_count(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }

    /// Total bytes across all groups.
    pub fn total_size(&self) -> u64 {
        self.groups
            .iter()
            .flat_map(|g| g.entries.iter())
            .map(FileEntry::size)
            .sum()
    }
}

/// Partition a flat list of entries into groups keyed by the first path
/// segment. Entries without a subdirectory land in [`UNGROUPED_KEY`].
pub fn group_files<I>(entries: I) -> GroupedFiles
where
    I: IntoIterator<Item = FileEntry>,
{
    let mut grouped = GroupedFiles::new();
    for entry in entries {
        grouped.insert(entry);
    }
    grouped
}
