//! Configuration data structures for experiment setups.

mod settings;

pub use settings::{Experiment, Settings, SettingsError};
