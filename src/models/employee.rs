//! Employee model.
//!
//! The employee is read-only from the payslip engine's point of view: it
//! supplies display attributes and the base salary used when a payroll
//! record has to be synthesized.

use serde::{Deserialize, Serialize};

/// Represents an employee whose payslip is being displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name, also used in exported file names.
    pub name: String,
    /// Department the employee belongs to.
    pub department: String,
    /// Job title.
    pub position: String,
    /// Monthly base salary in yen.
    pub base_salary: i64,
    /// Number of dependents, shown in the payslip's detail section.
    #[serde(default)]
    pub dependents: u32,
    /// Municipality of residence.
    #[serde(default)]
    pub municipality: String,
}
