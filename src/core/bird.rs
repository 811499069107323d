//! A single bird and its fixed attributes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sex of a bird, as recorded in the roster (`m` or `f`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "m")]
    Male,
    #[serde(rename = "f")]
    Female,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Sex::Male => write!(f, "m"),
            Sex::Female => write!(f, "f"),
        }
    }
}

/// One bird of the flock.
///
/// `mates` is symmetric across the flock and is only written while the
/// flock is being built; selection rounds never mutate it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bird {
    pub name: String,
    pub cohort: i32,
    pub sex: Sex,
    pub mates: Vec<String>,
}

impl Bird {
    pub fn new(name: impl Into<String>, cohort: i32, sex: Sex) -> Self {
        Self {
            name: name.into(),
            cohort,
            sex,
            mates: Vec::new(),
        }
    }

    pub fn is_mate_of(&self, name: &str) -> bool {
        self.mates.iter().any(|mate| mate == name)
    }
}
