//! Flock module
//!
//! The flock is the fixed population a selection round draws from. It keeps
//! the birds in roster order and answers the queries the selector needs:
//! lookup by name, sex-partitioned views in cohort order, and the mate set
//! of a partial selection.

use std::collections::BTreeSet;

use crate::core::bird::{Bird, Sex};
use crate::errors::{Result, SubflockError};

/// A `Flock` is an ordered collection of birds, built once at startup.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Flock {
    birds: Vec<Bird>,
}

impl Flock {
    /// Construct a new, empty `Flock`.
    pub fn new() -> Self {
        Self { birds: Vec::new() }
    }

    /// Construct a `Flock` from roster-ordered birds.
    pub fn from_birds(birds: Vec<Bird>) -> Self {
        Self { birds }
    }

    pub fn is_empty(&self) -> bool {
        self.birds.is_empty()
    }

    pub fn len(&self) -> usize {
        self.birds.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bird> {
        self.birds.iter()
    }

    /// Add a bird to the end of the flock.
    pub fn push(&mut self, bird: Bird) {
        self.birds.push(bird);
    }

    /// Record a pairing between two birds, symmetrically.
    ///
    /// Both names must resolve; a pairing that references a bird missing
    /// from the roster is a dataset error, not something to skip.
    pub fn pair(&mut self, male: &str, female: &str) -> Result<()> {
        let male_idx = self.index_of(male)?;
        let female_idx = self.index_of(female)?;
        let female_name = self.birds[female_idx].name.clone();
        self.birds[male_idx].mates.push(female_name);
        let male_name = self.birds[male_idx].name.clone();
        self.birds[female_idx].mates.push(male_name);
        Ok(())
    }

    /// Look up a bird by name.
    pub fn get(&self, name: &str) -> Result<&Bird> {
        self.index_of(name).map(|idx| &self.birds[idx])
    }

    /// All birds of one sex, ascending by cohort.
    ///
    /// The sort is stable, so birds of the same cohort keep their roster
    /// order. Seeded runs are reproducible because of this.
    pub fn of_sex(&self, sex: Sex) -> Vec<&Bird> {
        let mut birds: Vec<&Bird> = self.birds.iter().filter(|bird| bird.sex == sex).collect();
        birds.sort_by_key(|bird| bird.cohort);
        birds
    }

    /// The deduplicated union of the mate sets of the named birds.
    pub fn mates_of<'a, I>(&self, names: I) -> Result<BTreeSet<String>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut mates = BTreeSet::new();
        for name in names {
            let bird = self.get(name)?;
            mates.extend(bird.mates.iter().cloned());
        }
        Ok(mates)
    }

    /// All names in the flock, ascending.
    pub fn names(&self) -> BTreeSet<String> {
        self.birds.iter().map(|bird| bird.name.clone()).collect()
    }

    fn index_of(&self, name: &str) -> Result<usize> {
        self.birds
            .iter()
            .position(|bird| bird.name == name)
            .ok_or_else(|| SubflockError::UnknownBird(name.to_string()))
    }
}
