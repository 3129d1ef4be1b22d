//! Model Module
//!
//! The employee record and the views computed over it.
//!
//! ## Persisted Form
//! ```text
//! {
//!   "id": 1,
//!   "name": "Jane Doe",
//!   "position": "Engineer",
//!   "hireDate": "03/15/2019",
//!   "active": true,
//!   "directReports": [2, 3]
//! }
//! ```
//!
//! Unknown fields are ignored on input and never written back.

pub(crate) mod date;
mod employee;

pub use date::{format_date, parse_date, DATE_FORMAT};
pub use employee::{Employee, EmployeeWithReports, UNKNOWN_REPORT};

/// Caller-supplied employee identifier
pub type EmployeeId = i64;
