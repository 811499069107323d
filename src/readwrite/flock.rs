//! Reading a flock from roster and pairing files.

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

use crate::core::{Bird, Flock, Sex};
use crate::errors::{Result, SubflockError};

/// Builds a flock from the two input relations: the roster (name, cohort,
/// sex) and the pairing list (male, female).
pub trait FlockIO: Sized {
    fn read(roster_path: &str, pairs_path: &str) -> Result<Self>;
    fn from_readers(roster: impl io::Read, pairs: impl io::Read) -> Result<Self>;
}

#[derive(Debug, Deserialize)]
struct RosterRecord {
    name: String,
    cohort: i32,
    sex: Sex,
}

#[derive(Debug, Deserialize)]
struct PairRecord {
    male: String,
    female: String,
}

impl FlockIO for Flock {
    fn read(roster_path: &str, pairs_path: &str) -> Result<Flock> {
        let roster = open(roster_path)?;
        let pairs = open(pairs_path)?;
        Self::from_readers(roster, pairs)
    }

    fn from_readers(roster: impl io::Read, pairs: impl io::Read) -> Result<Flock> {
        let mut flock = Flock::new();

        let mut roster_reader = csv::Reader::from_reader(roster);
        for record in roster_reader.deserialize() {
            let record: RosterRecord = record.map_err(|err| {
                SubflockError::MalformedInput(format!("bad roster record: {err}"))
            })?;
            if record.name.is_empty() {
                return Err(SubflockError::MalformedInput(
                    "roster record with empty name".to_string(),
                ));
            }
            flock.push(Bird::new(record.name, record.cohort, record.sex));
        }

        let mut pairs_reader = csv::Reader::from_reader(pairs);
        for record in pairs_reader.deserialize() {
            let record: PairRecord = record.map_err(|err| {
                SubflockError::MalformedInput(format!("bad pairing record: {err}"))
            })?;
            flock.pair(&record.male, &record.female)?;
        }

        Ok(flock)
    }
}

fn open(path: &str) -> Result<io::BufReader<fs::File>> {
    let file = fs::File::open(Path::new(path))
        .map_err(|err| SubflockError::ReadError(format!("failed to open {path}: {err}")))?;
    Ok(io::BufReader::new(file))
}
