//! This module contains the core datatypes of the library.

pub mod bird;
pub mod flock;
pub mod selector;
pub mod window;

pub use bird::{Bird, Sex};
pub use flock::Flock;
pub use selector::{HistorySink, Selector};
pub use window::{Recency, RecentWindow, WINDOW_ROUNDS};
