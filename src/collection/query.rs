//! Read queries over a Collection
//!
//! All queries are pure: they clone out the records they return.

use chrono::NaiveDate;

use super::Collection;
use crate::model::{Employee, EmployeeId, EmployeeWithReports, UNKNOWN_REPORT};

impl Collection {
    /// Active employees, ascending by surname.
    ///
    /// The sort is stable, so equal surnames keep collection order.
    pub fn active_sorted(&self) -> Vec<Employee> {
        let mut active: Vec<&Employee> = self.iter().filter(|e| e.active).collect();
        active.sort_by(|a, b| a.surname().cmp(b.surname()));
        active.into_iter().cloned().collect()
    }

    /// Display name for a report id, or `"Unknown"` if it does not resolve
    pub fn display_name(&self, id: EmployeeId) -> &str {
        self.get(id).map(|e| e.name.as_str()).unwrap_or(UNKNOWN_REPORT)
    }

    /// An employee plus one display name per direct report entry
    pub fn with_reports(&self, id: EmployeeId) -> Option<EmployeeWithReports> {
        let employee = self.get(id)?;
        let direct_reports = employee
            .direct_reports
            .iter()
            .map(|&report| self.display_name(report).to_string())
            .collect();

        Some(EmployeeWithReports {
            employee: employee.clone(),
            direct_reports,
        })
    }

    /// Employees hired within `[start, end]`, most recent first.
    ///
    /// An inverted range matches nothing. Equal hire dates keep collection
    /// order.
    pub fn hired_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<Employee> {
        let mut hired: Vec<&Employee> = self
            .iter()
            .filter(|e| e.hire_date >= start && e.hire_date <= end)
            .collect();
        hired.sort_by(|a, b| b.hire_date.cmp(&a.hire_date));
        hired.into_iter().cloned().collect()
    }
}
