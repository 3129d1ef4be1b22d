//! Collection implementation
//!
//! Ordered records with an id index.

use std::collections::HashMap;

use crate::error::{Result, RosterError};
use crate::model::{Employee, EmployeeId};

/// The full set of employee records, keyed by id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    /// Records in collection order
    records: Vec<Employee>,

    /// id -> position in `records`
    index: HashMap<EmployeeId, usize>,
}

impl Collection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from decoded records, keeping their order.
    ///
    /// Fails with `DuplicateId` on the first id seen twice.
    pub fn from_records(records: Vec<Employee>) -> Result<Self> {
        let mut index = HashMap::with_capacity(records.len());
        for (pos, employee) in records.iter().enumerate() {
            if index.insert(employee.id, pos).is_some() {
                return Err(RosterError::DuplicateId(employee.id));
            }
        }
        Ok(Self { records, index })
    }

    /// Get an employee by id
    pub fn get(&self, id: EmployeeId) -> Option<&Employee> {
        self.index.get(&id).map(|&pos| &self.records[pos])
    }

    /// Check whether an id is taken
    pub fn contains(&self, id: EmployeeId) -> bool {
        self.index.contains_key(&id)
    }

    /// Append a new employee. Never overwrites.
    pub fn insert(&mut self, employee: Employee) -> Result<&Employee> {
        if self.contains(employee.id) {
            return Err(RosterError::DuplicateId(employee.id));
        }
        let pos = self.records.len();
        self.index.insert(employee.id, pos);
        self.records.push(employee);
        Ok(&self.records[pos])
    }

    /// Mark an employee inactive. Idempotent.
    ///
    /// Returns `None` if the id is unknown.
    pub fn deactivate(&mut self, id: EmployeeId) -> Option<&Employee> {
        let pos = *self.index.get(&id)?;
        self.records[pos].active = false;
        Some(&self.records[pos])
    }

    /// All records in collection order
    pub fn records(&self) -> &[Employee] {
        &self.records
    }

    /// Iterate records in collection order
    pub fn iter(&self) -> std::slice::Iter<'_, Employee> {
        self.records.iter()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the collection is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Employee;
    type IntoIter = std::slice::Iter<'a, Employee>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
