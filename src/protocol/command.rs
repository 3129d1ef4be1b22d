//! Request definitions
//!
//! Represents requests from clients, one per store operation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{Employee, EmployeeId};

/// A parsed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    /// Active employees sorted by surname
    ListActive,

    /// One employee with direct report names
    Get { id: EmployeeId },

    /// Employees hired within an inclusive date range
    HiredBetween {
        #[serde(with = "crate::model::date::mmddyyyy")]
        start: NaiveDate,
        #[serde(with = "crate::model::date::mmddyyyy")]
        end: NaiveDate,
    },

    /// Create an employee
    Insert { employee: Employee },

    /// Deactivate an employee
    Deactivate { id: EmployeeId },

    /// Ping (health check)
    Ping,
}

impl Request {
    /// Short operation name for logging
    pub fn op(&self) -> &'static str {
        match self {
            Request::ListActive => "list_active",
            Request::Get { .. } => "get",
            Request::HiredBetween { .. } => "hired_between",
            Request::Insert { .. } => "insert",
            Request::Deactivate { .. } => "deactivate",
            Request::Ping => "ping",
        }
    }

    /// Whether the request mutates the store
    pub fn is_write(&self) -> bool {
        matches!(self, Request::Insert { .. } | Request::Deactivate { .. })
    }
}
