//! Snapshot Module
//!
//! Durable storage for the whole collection.
//!
//! ## Responsibilities
//! - Load the collection once at bootstrap
//! - Rewrite the entire collection after every mutation
//! - Never leave a torn snapshot behind
//!
//! ## File Format
//! A pretty-printed JSON array of employee objects:
//! ```text
//! [
//!   {
//!     "id": 1,
//!     "name": "Jane Doe",
//!     "position": "Engineer",
//!     "hireDate": "03/15/2019",
//!     "active": true,
//!     "directReports": [2]
//!   }
//! ]
//! ```
//!
//! ## Atomic Replace
//! ```text
//! data.json.tmp  ← serialize + (fsync)
//! data.json.tmp  → rename → data.json
//! ```

mod reader;
mod writer;

use std::path::{Path, PathBuf};

use crate::config::SnapshotSync;
use crate::error::Result;
use crate::model::Employee;

pub use reader::read_snapshot;
pub use writer::{temp_path, write_snapshot};

/// Persistence backend for the record store.
///
/// The store calls `load` once while bootstrapping and `save` with the full
/// staged collection inside its write lock. Implementations need not be
/// incremental.
pub trait Snapshot: Send + Sync {
    /// Read the persisted collection. `Ok(None)` means nothing is persisted yet.
    fn load(&self) -> Result<Option<Vec<Employee>>>;

    /// Replace the persisted collection with `records`.
    fn save(&self, records: &[Employee]) -> Result<()>;
}

/// Whole-file JSON snapshot
#[derive(Debug, Clone)]
pub struct JsonSnapshot {
    path: PathBuf,
    sync: SnapshotSync,
}

impl JsonSnapshot {
    /// Create a snapshot backend for the file at `path`
    pub fn new(path: impl Into<PathBuf>, sync: SnapshotSync) -> Self {
        Self {
            path: path.into(),
            sync,
        }
    }

    /// Path of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Snapshot for JsonSnapshot {
    fn load(&self) -> Result<Option<Vec<Employee>>> {
        read_snapshot(&self.path)
    }

    fn save(&self, records: &[Employee]) -> Result<()> {
        write_snapshot(&self.path, records, self.sync)
    }
}
