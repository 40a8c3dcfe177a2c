/// Application state management.
///
/// Centralises all mutable state that the UI reads and writes.
/// The fetch thread communicates via a channel; its result is applied in
/// `process_fetch_messages()`, which runs once per frame.
///
/// Display options are never edited in place: every user action swaps in
/// a new [`DisplayOptions`] value, and the visible groups are derived from
/// the current snapshot and options on demand.
use specviewer_core::config::SourceConfig;
use specviewer_core::snapshot::{start_fetch, FetchHandle, FetchMessage, Snapshot, SnapshotCache};
use specviewer_core::source::{GitHubSource, ListingSource};
use specviewer_core::view::{compute_visible, BuiltinSet, DisplayOptions, VisibleGroup};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// The current phase of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPhase {
    /// Nothing fetched yet and no fetch running.
    Idle,
    /// A fetch is in flight. Any previous snapshot is still shown.
    Fetching,
    /// At least one fetch has finished (successfully or not).
    Ready,
}

/// Outcome of a refresh request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new fetch was started.
    Started,
    /// The current snapshot is still fresh; nothing was fetched.
    Fresh,
    /// A fetch is already running.
    InFlight,
}

/// All application state.
pub struct AppState {
    // ── Source ─────────────────────────────────────────
    pub config: SourceConfig,
    source: Arc<dyn ListingSource>,

    // ── Fetch ──────────────────────────────────────────
    pub phase: AppPhase,
    fetch_handle: Option<FetchHandle>,
    pub cache: SnapshotCache,
    pub last_fetch_duration: Option<Duration>,
    /// When the most recent fetch was started, successful or not.
    last_attempt: Option<Instant>,

    // ── View ───────────────────────────────────────────
    pub options: DisplayOptions,
    pub builtins: BuiltinSet,

    // ── UI state ───────────────────────────────────────
    pub show_about: bool,
    /// `true` = dark mode (default), `false` = light mode.
    pub dark_mode: bool,
}

impl AppState {
    /// State backed by the GitHub tree API for `config`.
    pub fn new(config: SourceConfig) -> Self {
        let source = Arc::new(GitHubSource::new(config.clone()));
        Self::with_source(config, source)
    }

    /// State backed by an arbitrary listing source.
    pub fn with_source(config: SourceConfig, source: Arc<dyn ListingSource>) -> Self {
        Self {
            cache: SnapshotCache::new(config.refresh_interval),
            config,
            source,
            phase: AppPhase::Idle,
            fetch_handle: None,
            last_fetch_duration: None,
            last_attempt: None,
            options: DisplayOptions::default(),
            builtins: BuiltinSet::default(),
            show_about: false,
            dark_mode: true,
        }
    }

    /// Start a fetch unless one is running or the snapshot is still fresh.
    pub fn request_refresh(&mut self) -> RefreshOutcome {
        if self.fetch_handle.is_some() {
            debug!("Refresh ignored: fetch already in flight");
            return RefreshOutcome::InFlight;
        }
        if !self.cache.is_stale() {
            debug!("Refresh ignored: snapshot is still fresh");
            return RefreshOutcome::Fresh;
        }

        self.begin_fetch(Instant::now())
    }

    /// Periodic refresh, called once per frame.
    pub fn refresh_if_due(&mut self) -> Option<RefreshOutcome> {
        self.refresh_if_due_at(Instant::now())
    }

    /// Start a fetch when the snapshot is stale at `now`, nothing is in
    /// flight, and the last attempt is at least one interval old.
    pub fn refresh_if_due_at(&mut self, now: Instant) -> Option<RefreshOutcome> {
        if self.is_fetching() || !self.cache.is_stale_at(now) {
            return None;
        }
        if let Some(last) = self.last_attempt {
            if now.saturating_duration_since(last) < self.cache.refresh_interval() {
                return None;
            }
        }
        debug!("Snapshot expired; starting periodic refresh");
        Some(self.begin_fetch(now))
    }

    fn begin_fetch(&mut self, now: Instant) -> RefreshOutcome {
        info!("Refreshing listing for {}", self.config.slug());
        self.phase = AppPhase::Fetching;
        self.last_attempt = Some(now);
        self.fetch_handle = Some(start_fetch(self.source.clone()));
        RefreshOutcome::Started
    }

    pub fn is_fetching(&self) -> bool {
        self.fetch_handle.is_some()
    }

    /// Apply a finished fetch, if any. Called once per frame.
    ///
    /// Returns `true` if the UI should repaint.
    pub fn process_fetch_messages(&mut self) -> bool {
        let handle = match &self.fetch_handle {
            Some(h) => h,
            None => return false,
        };

        let msg = match handle.rx.try_recv() {
            Ok(m) => m,
            Err(crossbeam_channel::TryRecvError::Empty) => return false,
            Err(crossbeam_channel::TryRecvError::Disconnected) => {
                // Worker died without reporting; allow a new request.
                self.fetch_handle = None;
                self.phase = AppPhase::Ready;
                return true;
            }
        };

        match msg {
            FetchMessage::Complete { result, duration } => {
                self.last_fetch_duration = Some(duration);
                // Failures are recorded in the cache; the old snapshot stays.
                let _ = self.cache.apply(result);
            }
        }

        self.fetch_handle = None;
        self.phase = AppPhase::Ready;
        true
    }

    /// The snapshot being shown, if any.
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.cache.current()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.cache.last_error()
    }

    // ── Display options ────────────────────────────────

    pub fn set_search(&mut self, text: &str) {
        if text != self.options.search_text {
            self.options = self.options.with_search(text);
        }
    }

    pub fn toggle_size(&mut self) {
        self.options = self.options.toggle_size();
    }

    pub fn toggle_builtins(&mut self) {
        self.options = self.options.toggle_builtins();
    }

    /// Groups to render for the current snapshot and options.
    ///
    /// Recomputed on every call; the listing is small enough that no
    /// caching or debouncing is needed.
    pub fn visible_groups(&self) -> Vec<VisibleGroup> {
        match self.cache.current() {
            Some(snapshot) => compute_visible(&snapshot.files, &self.options, &self.builtins),
            None => Vec::new(),
        }
    }
}
