//! Wide indicator-table export of the full selection log.
//!
//! One row per round, one column per bird, `1` where the bird was in that
//! round's selection. The `day` column carries the 1-indexed round number.
//! The table is what downstream plotting consumes; nothing in the
//! selection machinery depends on it.

use std::collections::{BTreeSet, HashSet};
use std::io;
use std::path::Path;

use crate::errors::{Result, SubflockError};

/// Write the indicator table for `log` over the given name universe.
///
/// Columns are `day` followed by the names in ascending order.
pub fn write_indicator_table<W: io::Write>(
    writer: W,
    names: &BTreeSet<String>,
    log: &[Vec<String>],
) -> Result<()> {
    let mut table = csv::Writer::from_writer(writer);

    let mut header = vec!["day".to_string()];
    header.extend(names.iter().cloned());
    table.write_record(&header).map_err(csv_error)?;

    for (index, round) in log.iter().enumerate() {
        let selected: HashSet<&str> = round.iter().map(String::as_str).collect();
        let mut row = vec![(index + 1).to_string()];
        for name in names {
            let cell = if selected.contains(name.as_str()) { "1" } else { "0" };
            row.push(cell.to_string());
        }
        table.write_record(&row).map_err(csv_error)?;
    }

    table.flush().map_err(|err| SubflockError::WriteError(err.to_string()))?;
    Ok(())
}

/// Write the indicator table to a file.
pub fn export_indicator_table(
    path: &Path,
    names: &BTreeSet<String>,
    log: &[Vec<String>],
) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|err| {
        SubflockError::WriteError(format!("failed to create {}: {err}", path.display()))
    })?;
    write_indicator_table(io::BufWriter::new(file), names, log)
}

fn csv_error(err: csv::Error) -> SubflockError {
    SubflockError::WriteError(format!("failed to write table: {err}"))
}
