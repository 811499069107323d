//! IO for flocks, selection history, and exported tables.

mod flock;
mod history;
mod table;

pub use flock::FlockIO;
pub use history::{HistoryStore, FULL_HISTORY_FILE, RECENT_HISTORY_FILE};
pub use table::{export_indicator_table, write_indicator_table};
