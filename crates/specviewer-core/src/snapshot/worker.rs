/// Background fetch worker.
///
/// The single network call runs on its own thread so the UI keeps
/// painting. The result comes back as one [`FetchMessage`] over a
/// crossbeam channel; the UI drains it once per frame.
use crate::model::GroupedFiles;
use crate::source::{ListingSource, SourceError};
use crossbeam_channel::Receiver;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

/// Messages sent from the fetch thread to the UI.
#[derive(Debug)]
pub enum FetchMessage {
    /// The fetch finished, successfully or not.
    Complete {
        result: Result<GroupedFiles, SourceError>,
        duration: Duration,
    },
}

/// Handle to a running or finished fetch.
pub struct FetchHandle {
    /// Receiver for the completion message.
    pub rx: Receiver<FetchMessage>,
    /// Join handle for the fetch thread.
    _thread: Option<thread::JoinHandle<()>>,
}

/// Start a fetch on a background thread.
///
/// If the thread cannot be spawned the fetch runs inline and the handle
/// already holds its result.
pub fn start_fetch(source: Arc<dyn ListingSource>) -> FetchHandle {
    let (tx, rx) = crossbeam_channel::bounded::<FetchMessage>(1);

    let worker_source = source.clone();
    let worker_tx = tx.clone();
    let spawned = thread::Builder::new()
        .name("specviewer-fetch".into())
        .spawn(move || {
            let _ = worker_tx.send(run_fetch(worker_source.as_ref()));
        });

    let thread = match spawned {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::warn!("Could not spawn fetch thread ({e}); fetching inline");
            let _ = tx.send(run_fetch(source.as_ref()));
            None
        }
    };

    FetchHandle {
        rx,
        _thread: thread,
    }
}

fn run_fetch(source: &dyn ListingSource) -> FetchMessage {
    let started = Instant::now();
    let result = source.fetch_grouped();
    let duration = started.elapsed();
    info!(
        "Fetch finished in {:.2}s ({})",
        duration.as_secs_f64(),
        if result.is_ok() { "ok" } else { "failed" }
    );
    FetchMessage::Complete { result, duration }
}
