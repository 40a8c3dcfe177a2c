/// Snapshot module — holds the last grouped listing and decides when it
/// may be replaced.
///
/// A snapshot is served unchanged for `refresh_interval`; after that the
/// next refresh request re-fetches. A failed fetch never discards the
/// previous snapshot.
pub mod worker;

pub use worker::{start_fetch, FetchHandle, FetchMessage};

use crate::model::GroupedFiles;
use crate::source::{ListingSource, SourceError};
use chrono::{DateTime, Local};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Grouped files plus when they were fetched.
#[derive(Debug)]
pub struct Snapshot {
    pub files: GroupedFiles,
    /// Wall-clock time shown to the user.
    pub fetched_at: DateTime<Local>,
    /// Monotonic time used for freshness checks.
    fetched_instant: Instant,
}

impl Snapshot {
    pub fn new(files: GroupedFiles) -> Self {
        Self::new_at(files, Instant::now())
    }

    pub fn new_at(files: GroupedFiles, fetched_instant: Instant) -> Self {
        Self {
            files,
            fetched_at: Local::now(),
            fetched_instant,
        }
    }

    /// Age relative to `now`. Saturates at zero.
    pub fn age_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.fetched_instant)
    }
}

/// The last valid snapshot and the outcome of the last refresh.
#[derive(Debug)]
pub struct SnapshotCache {
    refresh_interval: Duration,
    current: Option<Arc<Snapshot>>,
    last_error: Option<String>,
}

impl SnapshotCache {
    pub fn new(refresh_interval: Duration) -> Self {
        Self {
            refresh_interval,
            current: None,
            last_error: None,
        }
    }

    /// The snapshot being served, if any fetch has ever succeeded.
    pub fn current(&self) -> Option<Arc<Snapshot>> {
        self.current.clone()
    }

    /// Message of the most recent failed refresh, cleared on success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    pub fn is_stale(&self) -> bool {
        self.is_stale_at(Instant::now())
    }

    /// True when there is no snapshot or it is older than the interval.
    pub fn is_stale_at(&self, now: Instant) -> bool {
        match &self.current {
            Some(snapshot) => snapshot.age_at(now) >= self.refresh_interval,
            None => true,
        }
    }

    /// Replace the served snapshot.
    pub fn store(&mut self, snapshot: Snapshot) -> Arc<Snapshot> {
        let snapshot = Arc::new(snapshot);
        self.current = Some(snapshot.clone());
        self.last_error = None;
        snapshot
    }

    /// Record a failed update. The previous snapshot stays in place.
    pub fn record_failure(&mut self, err: &SourceError) {
        warn!("Snapshot update failed: {err}");
        self.last_error = Some(err.to_string());
    }

    /// Apply the result of a fetch.
    pub fn apply(
        &mut self,
        result: Result<GroupedFiles, SourceError>,
    ) -> Result<Arc<Snapshot>, SourceError> {
        match result {
            Ok(files) => Ok(self.store(Snapshot::new(files))),
            Err(e) => {
                self.record_failure(&e);
                Err(e)
            }
        }
    }

    /// Serve the cached snapshot while fresh, otherwise fetch synchronously
    /// from `source`.
    ///
    /// This is the blocking form of the refresh policy. The GUI runs the
    /// same policy asynchronously: [`start_fetch`] on the worker, then
    /// [`SnapshotCache::apply`] when the result arrives.
    pub fn get_or_refresh(
        &mut self,
        source: &dyn ListingSource,
    ) -> Result<Arc<Snapshot>, SourceError> {
        if let Some(snapshot) = self.current.as_ref().filter(|_| !self.is_stale()) {
            debug!(
                "Serving cached snapshot from {}",
                snapshot.fetched_at.format("%H:%M:%S")
            );
            return Ok(snapshot.clone());
        }
        self.apply(source.fetch_grouped())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{group_files, FileEntry};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingSource {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    impl ListingSource for CountingSource {
        fn fetch_grouped(&self) -> Result<GroupedFiles, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(SourceError::Status {
                    url: "https://example.invalid".into(),
                    status: 500,
                })
            } else {
                Ok(group_files(vec![FileEntry::new("git", 512)]))
            }
        }
    }

    #[test]
    fn test_empty_cache_is_stale() {
        let cache = SnapshotCache::new(Duration::from_secs(60));
        assert!(cache.is_stale());
        assert!(cache.current().is_none());
    }

    #[test]
    fn test_freshness_window() {
        let mut cache = SnapshotCache::new(Duration::from_secs(60));
        let start = Instant::now();
        cache.store(Snapshot::new_at(GroupedFiles::new(), start));

        assert!(!cache.is_stale_at(start + Duration::from_secs(59)));
        assert!(cache.is_stale_at(start + Duration::from_secs(60)));
    }

    #[test]
    fn test_fresh_snapshot_is_served_without_fetching() {
        let mut cache = SnapshotCache::new(Duration::from_secs(60));
        let source = CountingSource::new(false);

        let first = cache.get_or_refresh(&source).unwrap();
        let second = cache.get_or_refresh(&source).unwrap();

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_stale_snapshot_is_refetched() {
        let mut cache = SnapshotCache::new(Duration::ZERO);
        let source = CountingSource::new(false);

        cache.get_or_refresh(&source).unwrap();
        cache.get_or_refresh(&source).unwrap();

        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failure_keeps_previous_snapshot() {
        let mut cache = SnapshotCache::new(Duration::ZERO);
        let good = cache.get_or_refresh(&CountingSource::new(false)).unwrap();

        let err = cache.get_or_refresh(&CountingSource::new(true)).unwrap_err();
        assert!(err.is_fetch());

        let served = cache.current().expect("previous snapshot must survive");
        assert!(Arc::ptr_eq(&good, &served));
        assert!(cache.last_error().unwrap().contains("500"));
    }

    #[test]
    fn test_success_clears_last_error() {
        let mut cache = SnapshotCache::new(Duration::ZERO);
        let _ = cache.get_or_refresh(&CountingSource::new(true));
        assert!(cache.last_error().is_some());

        cache.get_or_refresh(&CountingSource::new(false)).unwrap();
        assert!(cache.last_error().is_none());
    }
}
