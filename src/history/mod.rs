//! Read-side helpers for the history view: filtering, sorting, a per-view
//! summary and CSV export.

mod export;
mod query;

pub use export::{export_to_path, write_csv};
pub use query::{summarize, DateRange, HistoryQuery, HistorySummary, SortKey};
