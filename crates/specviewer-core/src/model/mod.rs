/// Data model for the spec listing.
///
/// Re-exports the file entry, the grouping structure, and size formatting.
pub mod file_entry;
pub mod grouped;
pub mod size;

pub use file_entry::{FileEntry, PATH_SEPARATOR};
pub use grouped::{group_files, FileGroup, GroupedFiles, UNGROUPED_KEY};
