//! Snapshot Reader
//!
//! Loads the collection from disk.

use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;

use crate::error::Result;
use crate::model::Employee;

/// Read and decode the snapshot at `path`.
///
/// Returns `Ok(None)` if the file does not exist. Any other read or decode
/// failure is returned as-is; unknown fields in the file are ignored.
pub fn read_snapshot(path: &Path) -> Result<Option<Vec<Employee>>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let records: Vec<Employee> = serde_json::from_reader(BufReader::new(file))?;
    tracing::debug!("Read {} records from {}", records.len(), path.display());

    Ok(Some(records))
}
