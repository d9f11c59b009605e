//! Pay-period index over a flat payroll record list.
//!
//! The index answers three questions for one employee: which periods have
//! a record, which record belongs to a given period, and which period sits
//! next to a given one chronologically.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{PayrollRecord, Period};

/// Direction of a chronological step through the period list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Towards older periods.
    Previous,
    /// Towards newer periods.
    Next,
}

/// Lists the periods for which `employee_id` has a record, most recent
/// first.
///
/// Records whose month string is not a valid month are skipped. The result
/// is strictly descending, so duplicate records for one period appear once.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::list_periods;
/// use payslip_engine::models::{PayrollRecord, Period};
/// # use chrono::Utc;
/// # fn record(year: i32, month: &str) -> PayrollRecord {
/// #     PayrollRecord {
/// #         employee_id: "emp_001".to_string(), year, month: month.to_string(),
/// #         base_salary: 0, overtime: 0, bonus: 0, gross_pay: 0, income_tax: 0,
/// #         employee_insurance: 0, health_insurance: 0, pension_insurance: 0,
/// #         total_deductions: 0, net_pay: 0, created_at: Utc::now(),
/// #     }
/// # }
///
/// let records = vec![record(2024, "1"), record(2024, "3"), record(2023, "12")];
/// let periods = list_periods("emp_001", &records);
/// assert_eq!(
///     periods,
///     vec![
///         Period::new(2024, 3).unwrap(),
///         Period::new(2024, 1).unwrap(),
///         Period::new(2023, 12).unwrap(),
///     ]
/// );
/// ```
pub fn list_periods(employee_id: &str, records: &[PayrollRecord]) -> Vec<Period> {
    let mut periods: Vec<Period> = records
        .iter()
        .filter(|record| record.employee_id == employee_id)
        .filter_map(|record| {
            let period = record.period();
            if period.is_none() {
                warn!(
                    employee_id = %record.employee_id,
                    year = record.year,
                    month = %record.month,
                    "Skipping payroll record with invalid month"
                );
            }
            period
        })
        .collect();

    periods.sort_by(|a, b| b.cmp(a));
    periods.dedup();
    periods
}

/// Finds the record for `employee_id` in `period`.
///
/// When the input violates uniqueness the first matching record wins.
pub fn find_record<'a>(
    employee_id: &str,
    records: &'a [PayrollRecord],
    period: Period,
) -> Option<&'a PayrollRecord> {
    records
        .iter()
        .find(|record| record.matches(employee_id, period))
}

/// Returns the period chronologically adjacent to `current`.
///
/// `periods` must be sorted most recent first, as returned by
/// [`list_periods`]. [`Direction::Previous`] is the following element of
/// that list and [`Direction::Next`] the preceding one; both return `None`
/// at the ends of the list.
///
/// If `current` is not listed, `Previous` yields the most recent listed
/// period older than `current` and `Next` the oldest listed period newer
/// than it.
pub fn neighbor(periods: &[Period], current: Period, direction: Direction) -> Option<Period> {
    match periods.iter().position(|p| *p == current) {
        Some(index) => match direction {
            Direction::Previous => periods.get(index + 1).copied(),
            Direction::Next => index
                .checked_sub(1)
                .and_then(|i| periods.get(i))
                .copied(),
        },
        None => match direction {
            Direction::Previous => periods.iter().find(|p| **p < current).copied(),
            Direction::Next => periods.iter().rev().find(|p| **p > current).copied(),
        },
    }
}
