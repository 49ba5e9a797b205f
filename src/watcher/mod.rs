//! Background refresh of the analytics report while the history changes.

mod controller;
mod loop_worker;

pub use controller::HistoryWatcher;
