//! Request types for the payslip API.
//!
//! Both endpoints take the same payslip body; the export endpoint adds an
//! optional strategy override.

use serde::{Deserialize, Serialize};

use crate::export::ExportStrategy;
use crate::models::{Employee, PayrollRecord, Period};

/// Largest absolute yen amount accepted in a request.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Request body for `POST /payslip`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayslipRequest {
    /// The employee whose payslip is shown.
    pub employee: Employee,
    /// Payroll records available to the view, possibly for several
    /// employees.
    #[serde(default)]
    pub records: Vec<PayrollRecord>,
    /// The requested period, as `{"year", "month"}` or `"YYYY-M"`. Defaults
    /// to the current month.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
    /// Record to show when none exists for the requested period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<PayrollRecord>,
}

impl PayslipRequest {
    /// Rejects amounts beyond [`MAX_AMOUNT`] in the employee, the records
    /// or the fallback.
    pub fn validate_amounts(&self) -> Result<(), String> {
        if !(-MAX_AMOUNT..=MAX_AMOUNT).contains(&self.employee.base_salary) {
            return Err(format!(
                "employee.baseSalary {} exceeds {} yen",
                self.employee.base_salary, MAX_AMOUNT
            ));
        }

        let records = self
            .records
            .iter()
            .enumerate()
            .map(|(i, record)| (format!("records[{}]", i), record))
            .chain(self.fallback.iter().map(|record| ("fallback".to_string(), record)));
        for (path, record) in records {
            if let Some((field, amount)) = record.amount_out_of_range(MAX_AMOUNT) {
                return Err(format!(
                    "{}.{} {} exceeds {} yen",
                    path, field, amount, MAX_AMOUNT
                ));
            }
        }

        Ok(())
    }
}

/// Request body for `POST /payslip/export`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    /// The payslip to export.
    #[serde(flatten)]
    pub payslip: PayslipRequest,
    /// Overrides the configured export strategy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<ExportStrategy>,
    /// Also writes the document into the configured output directory.
    #[serde(default)]
    pub save: bool,
}
