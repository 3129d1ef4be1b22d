//! Store Module
//!
//! The record store that owns the collection and its snapshot.
//!
//! ## Responsibilities
//! - Bootstrap the collection from the snapshot (fatal on failure)
//! - Serve the read queries from a consistent collection
//! - Serialize mutations and persist each one before acknowledging it

use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::{Mutex, RwLock};

use crate::collection::Collection;
use crate::config::Config;
use crate::error::{Result, RosterError};
use crate::model::{Employee, EmployeeId, EmployeeWithReports};
use crate::snapshot::{JsonSnapshot, Snapshot};

/// The employee record store
///
/// ## Concurrency Model: Single-Writer / Multiple-Reader (SWMR)
///
/// - **Writes** (insert/deactivate): Serialized by `write_lock`
///   - Only ONE mutation at a time, covering check → stage → save → install
///   - The change is staged on a copy of the collection and saved first;
///     the copy becomes live only if the save succeeds
///
/// - **Reads** (list/get/range): Concurrent
///   - Take the `collection` read lock just long enough to clone the `Arc`
///   - Never see a mutation that was not flushed, never see a torn record
///   - Are not blocked by snapshot file I/O
pub struct RecordStore {
    /// Store configuration
    config: Config,

    /// Persistence backend
    snapshot: Box<dyn Snapshot>,

    /// Live collection, replaced wholesale on every committed mutation
    collection: RwLock<Arc<Collection>>,

    /// Serializes mutations (insert/deactivate)
    write_lock: Mutex<()>,
}

impl RecordStore {
    /// Open the store backed by the JSON snapshot named in `config`
    ///
    /// On startup:
    /// 1. Read and decode the whole snapshot file
    /// 2. Reject duplicate ids
    /// 3. Ready to serve requests
    ///
    /// Any failure is returned as `RosterError::Bootstrap`.
    pub fn open(config: Config) -> Result<Self> {
        let snapshot = JsonSnapshot::new(&config.snapshot_path, config.snapshot_sync);
        Self::with_snapshot(config, Box::new(snapshot))
    }

    /// Open with a snapshot path (convenience method)
    ///
    /// Uses default config with the specified snapshot file
    pub fn open_path(path: &Path) -> Result<Self> {
        let config = Config::builder().snapshot_path(path).build();
        Self::open(config)
    }

    /// Open the store over an arbitrary persistence backend
    pub fn with_snapshot(config: Config, snapshot: Box<dyn Snapshot>) -> Result<Self> {
        let records = match snapshot.load() {
            Ok(Some(records)) => records,
            Ok(None) if config.create_if_missing => {
                tracing::info!(
                    "No snapshot at {}, starting with an empty collection",
                    config.snapshot_path.display()
                );
                snapshot
                    .save(&[])
                    .map_err(|e| RosterError::Bootstrap(format!("cannot create snapshot: {}", e)))?;
                Vec::new()
            }
            Ok(None) => {
                return Err(RosterError::Bootstrap(format!(
                    "snapshot not found: {}",
                    config.snapshot_path.display()
                )));
            }
            Err(e) => {
                return Err(RosterError::Bootstrap(format!("cannot load snapshot: {}", e)));
            }
        };

        let collection = Collection::from_records(records)
            .map_err(|e| RosterError::Bootstrap(format!("invalid snapshot: {}", e)))?;

        tracing::info!("Loaded {} employees", collection.len());

        Ok(Self {
            config,
            snapshot,
            collection: RwLock::new(Arc::new(collection)),
            write_lock: Mutex::new(()),
        })
    }

    // =========================================================================
    // Read Operations
    // =========================================================================

    /// Active employees sorted ascending by surname
    pub fn list_active_sorted(&self) -> Vec<Employee> {
        self.current().active_sorted()
    }

    /// An employee with the display names of its direct reports.
    ///
    /// `None` if the id is not in the collection.
    pub fn get_with_reports(&self, id: EmployeeId) -> Option<EmployeeWithReports> {
        self.current().with_reports(id)
    }

    /// Employees hired within `[start, end]`, most recent first
    pub fn list_by_hire_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<Employee> {
        self.current().hired_between(start, end)
    }

    /// A single employee by id
    pub fn get(&self, id: EmployeeId) -> Option<Employee> {
        self.current().get(id).cloned()
    }

    // =========================================================================
    // Write Operations
    // =========================================================================

    /// Insert a new employee
    ///
    /// Steps:
    /// 1. Acquire write lock
    /// 2. Reject an id already in the collection
    /// 3. Append to a staged copy and save it
    /// 4. Install the staged copy
    ///
    /// If the save fails the collection is left as it was.
    pub fn insert(&self, employee: Employee) -> Result<Employee> {
        let _write_guard = self.write_lock.lock();

        let current = self.current();
        if current.contains(employee.id) {
            tracing::debug!("Rejected insert of duplicate id {}", employee.id);
            return Err(RosterError::DuplicateId(employee.id));
        }

        let mut staged = Collection::clone(&current);
        let stored = staged.insert(employee)?.clone();
        self.commit(staged)?;

        tracing::debug!("Inserted employee {}", stored.id);
        Ok(stored)
    }

    /// Mark an employee inactive
    ///
    /// Deactivating an inactive employee succeeds and still rewrites the
    /// snapshot. Returns `None` if the id is not in the collection.
    pub fn deactivate(&self, id: EmployeeId) -> Result<Option<Employee>> {
        let _write_guard = self.write_lock.lock();

        let current = self.current();
        if !current.contains(id) {
            return Ok(None);
        }

        let mut staged = Collection::clone(&current);
        let updated = match staged.deactivate(id) {
            Some(employee) => employee.clone(),
            None => return Ok(None),
        };
        self.commit(staged)?;

        tracing::debug!("Deactivated employee {}", id);
        Ok(Some(updated))
    }

    /// Persist `staged` and make it the live collection (write lock held)
    fn commit(&self, staged: Collection) -> Result<()> {
        if let Err(e) = self.snapshot.save(staged.records()) {
            tracing::warn!("Snapshot write failed, mutation discarded: {}", e);
            return Err(e);
        }

        *self.collection.write() = Arc::new(staged);
        Ok(())
    }

    /// Clone out the live collection handle
    fn current(&self) -> Arc<Collection> {
        Arc::clone(&self.collection.read())
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Number of employees in the collection
    pub fn len(&self) -> usize {
        self.current().len()
    }

    /// Check if the collection is empty
    pub fn is_empty(&self) -> bool {
        self.current().is_empty()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
