//! Summary statistics over a selection log.

use std::collections::BTreeMap;

use itertools::Itertools;

/// Trait extension to count how often each bird appears in a log.
pub trait SelectionCounts {
    fn selection_counts(&self) -> BTreeMap<String, usize>;
}

impl SelectionCounts for [Vec<String>] {
    /// Count selections per bird over all logged rounds.
    fn selection_counts(&self) -> BTreeMap<String, usize> {
        self.iter()
            .flatten()
            .counts()
            .into_iter()
            .map(|(name, count)| (name.clone(), count))
            .collect()
    }
}
