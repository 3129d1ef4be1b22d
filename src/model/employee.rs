//! Employee record

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::EmployeeId;

/// Display name used for a direct report id that resolves to no employee
pub const UNKNOWN_REPORT: &str = "Unknown";

/// One person in the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Unique, caller-supplied id
    pub id: EmployeeId,

    /// Given name and surname separated by whitespace
    pub name: String,

    /// Free-text job title
    pub position: String,

    #[serde(with = "crate::model::date::mmddyyyy")]
    pub hire_date: NaiveDate,

    /// Flipped to false by deactivation only
    #[serde(default = "default_active")]
    pub active: bool,

    /// Ids of other employees, in display order. May dangle.
    #[serde(default)]
    pub direct_reports: Vec<EmployeeId>,
}

fn default_active() -> bool {
    true
}

impl Employee {
    /// Create an active employee with no direct reports
    pub fn new(
        id: EmployeeId,
        name: impl Into<String>,
        position: impl Into<String>,
        hire_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            position: position.into(),
            hire_date,
            active: true,
            direct_reports: Vec::new(),
        }
    }

    /// Set the direct reports
    pub fn with_direct_reports(mut self, reports: impl Into<Vec<EmployeeId>>) -> Self {
        self.direct_reports = reports.into();
        self
    }

    /// Set the active flag
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// The sort key for name ordering: the second whitespace-separated token.
    ///
    /// Single-token names have no surname and yield `""`, which sorts before
    /// every real surname. Tokens past the second are ignored.
    pub fn surname(&self) -> &str {
        self.name.split_whitespace().nth(1).unwrap_or("")
    }
}

/// An employee together with the display names of its direct reports
///
/// `direct_reports[i]` is the name of `employee.direct_reports[i]`, or
/// [`UNKNOWN_REPORT`] when that id is not in the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeWithReports {
    pub employee: Employee,
    pub direct_reports: Vec<String>,
}
