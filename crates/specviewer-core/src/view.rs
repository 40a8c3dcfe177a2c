/// Filter, sort, and label the grouped listing for display.
///
/// [`compute_visible`] is a pure function of the snapshot, the current
/// [`DisplayOptions`], and the [`BuiltinSet`]. Groups that should not be
/// shown stay in the output with `hidden = true` so the caller can keep
/// stable widget ids.
use crate::model::size::format_bytes;
use crate::model::{FileEntry, GroupedFiles, UNGROUPED_KEY};
use icu_collator::{Collator, CollatorOptions, Strength};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use tracing::warn;

/// Label shown for the ungrouped bucket.
pub const UNGROUPED_LABEL: &str = "Main";

/// Group keys that hold bundled or example specs.
pub const DEFAULT_BUILTINS: [&str; 3] = ["example", "fig", "@withfig"];

/// User-controlled display options. Replaced wholesale on every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    pub search_text: String,
    pub show_size: bool,
    pub show_builtins: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            show_size: true,
            show_builtins: true,
        }
    }
}

impl DisplayOptions {
    #[must_use]
    pub fn with_search(&self, text: impl Into<String>) -> Self {
        Self {
            search_text: text.into(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn toggle_size(&self) -> Self {
        Self {
            show_size: !self.show_size,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn toggle_builtins(&self) -> Self {
        Self {
            show_builtins: !self.show_builtins,
            ..self.clone()
        }
    }
}

/// Fixed set of group keys hidden together by the builtins toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinSet(BTreeSet<String>);

impl Default for BuiltinSet {
    fn default() -> Self {
        Self::new(DEFAULT_BUILTINS)
    }
}

impl BuiltinSet {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(keys.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }
}

/// One file as it should be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleEntry {
    /// Full display path, used for links.
    pub path: String,
    /// Path without the group prefix.
    pub name: String,
    pub size: u64,
    /// Present only when sizes are shown.
    pub size_label: Option<String>,
}

/// One group as it should be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleGroup {
    pub key: String,
    pub display_name: String,
    /// Entries matching the search, sorted by name.
    pub entries: Vec<VisibleEntry>,
    /// Entry count before filtering; drives group order.
    pub total_count: usize,
    pub hidden: bool,
}

/// Label for a group heading.
pub fn group_display_name(key: &str) -> &str {
    if key == UNGROUPED_KEY {
        UNGROUPED_LABEL
    } else {
        key
    }
}

/// Root-locale collator at tertiary strength. Base letters decide first,
/// then accents, then case (lowercase before uppercase).
fn name_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Tertiary);
    match Collator::try_new(&Default::default(), options) {
        Ok(collator) => Some(collator),
        Err(e) => {
            warn!("Collation data unavailable, sorting by folded case: {e:?}");
            None
        }
    }
}

/// Locale-aware name order, with the raw name as tie-break so the order
/// is total.
fn compare_names(collator: Option<&Collator>, a: &str, b: &str) -> Ordering {
    match collator {
        Some(collator) => collator.compare(a, b),
        None => a.to_lowercase().cmp(&b.to_lowercase()),
    }
    .then_with(|| a.cmp(b))
}

/// Derive the visible sequence.
///
/// Groups are ordered by descending entry count, ties by ascending key.
/// Entries are kept when their name contains the search text
/// case-insensitively and are sorted by name in root-locale collation
/// order. A group is hidden when no
/// entry survives the search, or when it is a builtin and builtins are
/// switched off.
pub fn compute_visible(
    grouped: &GroupedFiles,
    options: &DisplayOptions,
    builtins: &BuiltinSet,
) -> Vec<VisibleGroup> {
    let needle = options.search_text.to_lowercase();
    let collator = name_collator();

    let mut groups: Vec<_> = grouped.iter().collect();
    groups.sort_by(|a, b| {
        b.entries
            .len()
            .cmp(&a.entries.len())
            .then_with(|| a.key.cmp(&b.key))
    });

    groups
        .into_iter()
        .map(|group| {
            let mut entries: Vec<VisibleEntry> = group
                .entries
                .iter()
                .map(|entry| (entry, entry.display_name(&group.key)))
                .filter(|(_, name)| needle.is_empty() || name.to_lowercase().contains(&needle))
                .map(|(entry, name)| visible_entry(entry, name, options.show_size))
                .collect();
            entries.sort_by(|a, b| compare_names(collator.as_ref(), &a.name, &b.name));

            let hidden =
                entries.is_empty() || (!options.show_builtins && builtins.contains(&group.key));

            VisibleGroup {
                key: group.key.clone(),
                display_name: group_display_name(&group.key).to_string(),
                entries,
                total_count: group.entries.len(),
                hidden,
            }
        })
        .collect()
}

fn visible_entry(entry: &FileEntry, name: String, show_size: bool) -> VisibleEntry {
    VisibleEntry {
        path: entry.path().to_string(),
        name,
        size: entry.size(),
        size_label: show_size.then(|| format_bytes(entry.size())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::group_files;

    fn sample() -> GroupedFiles {
        group_files(vec![
            FileEntry::new("aws/amplify", 2048),
            FileEntry::new("git", 512),
            FileEntry::new("aws/S3", 10),
            FileEntry::new("aws/ec2", 20),
            FileEntry::new("fig/settings", 5),
            FileEntry::new("npm", 1),
        ])
    }

    fn defaults(grouped: &GroupedFiles) -> Vec<VisibleGroup> {
        compute_visible(grouped, &DisplayOptions::default(), &BuiltinSet::default())
    }

    fn find<'a>(visible: &'a [VisibleGroup], key: &str) -> &'a VisibleGroup {
        visible.iter().find(|g| g.key == key).unwrap()
    }

    #[test]
    fn test_groups_sorted_by_count_then_key() {
        let visible = defaults(&sample());
        let keys: Vec<&str> = visible.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["aws", UNGROUPED_KEY, "fig"]);
    }

    #[test]
    fn test_equal_counts_tie_break_on_key() {
        let grouped = group_files(vec![
            FileEntry::new("zsh/a", 1),
            FileEntry::new("bash/a", 1),
            FileEntry::new("git", 1),
        ]);
        let visible = defaults(&grouped);
        let keys: Vec<&str> = visible.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec![UNGROUPED_KEY, "bash", "zsh"]);
    }

    #[test]
    fn test_ungrouped_label() {
        let visible = defaults(&sample());
        assert_eq!(find(&visible, UNGROUPED_KEY).display_name, "Main");
        assert_eq!(find(&visible, "aws").display_name, "aws");
    }

    #[test]
    fn test_entries_sorted_case_insensitively() {
        let visible = defaults(&sample());
        let names: Vec<&str> = find(&visible, "aws")
            .entries
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["amplify", "ec2", "S3"]);
    }

    #[test]
    fn test_entries_follow_locale_collation() {
        let names = ["a-b", "a_b", "a~", "aa", "Ab", "ab", "éclair", "zsh"];
        let grouped = group_files(names.iter().map(|n| FileEntry::new(format!("misc/{n}"), 1)));
        let visible = defaults(&grouped);
        let sorted: Vec<&str> = find(&visible, "misc")
            .entries
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(
            sorted,
            vec!["a_b", "a-b", "a~", "aa", "ab", "Ab", "éclair", "zsh"]
        );
    }

    #[test]
    fn test_fallback_order_is_case_folded() {
        assert_eq!(compare_names(None, "Ab", "ab"), Ordering::Less);
        assert_eq!(compare_names(None, "abc", "ABD"), Ordering::Less);
    }

    #[test]
    fn test_search_is_case_insensitive_on_name() {
        let options = DisplayOptions::default().with_search("S3");
        let visible = compute_visible(&sample(), &options, &BuiltinSet::default());

        let aws = find(&visible, "aws");
        assert!(!aws.hidden);
        assert_eq!(aws.entries.len(), 1);
        assert_eq!(aws.entries[0].name, "S3");

        assert!(find(&visible, UNGROUPED_KEY).hidden);
        assert!(find(&visible, "fig").hidden);
    }

    #[test]
    fn test_search_does_not_match_group_prefix() {
        // "aws" only appears in the group prefix, never in a display name.
        let options = DisplayOptions::default().with_search("aws");
        let visible = compute_visible(&sample(), &options, &BuiltinSet::default());
        assert!(visible.iter().all(|g| g.hidden));
    }

    #[test]
    fn test_hidden_groups_stay_in_sequence() {
        let options = DisplayOptions::default().with_search("zzz");
        let visible = compute_visible(&sample(), &options, &BuiltinSet::default());
        assert_eq!(visible.len(), sample().group_count());
        assert!(visible.iter().all(|g| g.hidden && g.entries.is_empty()));
    }

    #[test]
    fn test_builtins_toggle_hides_only_builtins() {
        let options = DisplayOptions::default().toggle_builtins();
        let visible = compute_visible(&sample(), &options, &BuiltinSet::default());
        assert!(find(&visible, "fig").hidden);
        assert!(!find(&visible, "aws").hidden);
        assert!(!find(&visible, UNGROUPED_KEY).hidden);
    }

    #[test]
    fn test_size_labels_follow_toggle() {
        let visible = defaults(&sample());
        let amplify = &find(&visible, "aws").entries[0];
        assert_eq!(amplify.size_label.as_deref(), Some("2KB"));

        let options = DisplayOptions::default().toggle_size();
        let visible = compute_visible(&sample(), &options, &BuiltinSet::default());
        assert!(visible
            .iter()
            .flat_map(|g| g.entries.iter())
            .all(|e| e.size_label.is_none()));
    }

    #[test]
    fn test_options_are_replaced_not_mutated() {
        let original = DisplayOptions::default();
        let changed = original.with_search("git").toggle_size();
        assert_eq!(original, DisplayOptions::default());
        assert_eq!(changed.search_text, "git");
        assert!(!changed.show_size);
        assert!(changed.show_builtins);
    }
}
