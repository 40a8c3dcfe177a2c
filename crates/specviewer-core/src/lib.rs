/// SpecViewer Core — fetching, grouping, and view derivation.
///
/// This crate contains all business logic with zero UI dependencies.
/// The GUI only ever calls into [`snapshot`] and [`view`].
///
/// # Modules
///
/// - [`model`] — File entries, grouping, and size formatting.
/// - [`config`] — Which repository is listed and how paths are trimmed.
/// - [`source`] — Remote listing fetch, parsing, and ingestion.
/// - [`snapshot`] — Freshness-bounded cache and the background fetch worker.
/// - [`view`] — Search filtering, sorting, and visibility flags.
pub mod config;
pub mod model;
pub mod snapshot;
pub mod source;
pub mod view;
