//! Fixed-rate deduction calculation.
//!
//! Synthesized payslips derive their four deduction components from gross
//! pay using the configured [`DeductionRates`]. Each component is floored to
//! whole yen independently, so the total can be up to three yen below
//! `gross × Σrates`.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::config::DeductionRates;

/// The four deduction components of a payslip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    /// Withheld income tax.
    pub income_tax: i64,
    /// Employment insurance premium.
    pub employee_insurance: i64,
    /// Health insurance premium.
    pub health_insurance: i64,
    /// Employees' pension insurance premium.
    pub pension_insurance: i64,
}

impl Deductions {
    /// Sum of all four components.
    pub fn total(&self) -> i64 {
        self.income_tax
            .saturating_add(self.employee_insurance)
            .saturating_add(self.health_insurance)
            .saturating_add(self.pension_insurance)
    }
}

/// Calculates each deduction as `floor(gross_pay × rate)`.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::calculate_deductions;
/// use payslip_engine::config::DeductionRates;
///
/// let deductions = calculate_deductions(315000, &DeductionRates::default());
/// assert_eq!(deductions.income_tax, 25200);
/// assert_eq!(deductions.employee_insurance, 1890);
/// assert_eq!(deductions.health_insurance, 15592);
/// assert_eq!(deductions.pension_insurance, 28822);
/// assert_eq!(deductions.total(), 71504);
/// ```
pub fn calculate_deductions(gross_pay: i64, rates: &DeductionRates) -> Deductions {
    Deductions {
        income_tax: floored_share(gross_pay, rates.income_tax),
        employee_insurance: floored_share(gross_pay, rates.employee_insurance),
        health_insurance: floored_share(gross_pay, rates.health_insurance),
        pension_insurance: floored_share(gross_pay, rates.pension_insurance),
    }
}

/// `floor(amount × rate)` in whole yen.
fn floored_share(amount: i64, rate: Decimal) -> i64 {
    // Rates are validated to [0, 1], so the product always fits in i64.
    (Decimal::from(amount) * rate)
        .floor()
        .to_i64()
        .unwrap_or_default()
}
