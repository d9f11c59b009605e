//! Payslip resolution.
//!
//! Resolution picks the payroll record to display for a requested period
//! and guarantees its derived totals are consistent. It never fails: when
//! no record exists and the caller supplied no fallback, a placeholder
//! record is synthesized from the employee's base salary and the configured
//! defaults. The returned [`Resolution`] says which of the three happened.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::config::{DeductionRates, FallbackConfig, PayrollConfig};
use crate::models::{Employee, PayrollRecord, Period};

use super::deductions::calculate_deductions;
use super::period_index::find_record;

/// Where a resolved record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    /// A record for the requested period existed.
    Found,
    /// The caller's explicit fallback record was used.
    Fallback,
    /// A placeholder record was synthesized.
    Synthesized,
}

impl ResolutionSource {
    /// Returns the snake_case name used in logs and API responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionSource::Found => "found",
            ResolutionSource::Fallback => "fallback",
            ResolutionSource::Synthesized => "synthesized",
        }
    }
}

/// A resolved payroll record, tagged with its source.
///
/// The wrapped record always satisfies
/// [`PayrollRecord::totals_consistent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "record", rename_all = "snake_case")]
pub enum Resolution {
    /// A record for the requested period existed.
    Found(PayrollRecord),
    /// The caller's explicit fallback record was used.
    Fallback(PayrollRecord),
    /// A placeholder record was synthesized.
    Synthesized(PayrollRecord),
}

impl Resolution {
    /// Returns where the record came from.
    pub fn source(&self) -> ResolutionSource {
        match self {
            Resolution::Found(_) => ResolutionSource::Found,
            Resolution::Fallback(_) => ResolutionSource::Fallback,
            Resolution::Synthesized(_) => ResolutionSource::Synthesized,
        }
    }

    /// Returns the resolved record.
    pub fn record(&self) -> &PayrollRecord {
        match self {
            Resolution::Found(record)
            | Resolution::Fallback(record)
            | Resolution::Synthesized(record) => record,
        }
    }

    /// Consumes the resolution, returning the record.
    pub fn into_record(self) -> PayrollRecord {
        match self {
            Resolution::Found(record)
            | Resolution::Fallback(record)
            | Resolution::Synthesized(record) => record,
        }
    }

    /// Returns true unless the record was found for the requested period.
    pub fn is_placeholder(&self) -> bool {
        !matches!(self, Resolution::Found(_))
    }
}

/// Resolves the payroll record to display for a period.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::{PayslipResolver, ResolutionSource};
/// use payslip_engine::models::{Employee, Period};
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: "山田太郎".to_string(),
///     department: "営業部".to_string(),
///     position: "課長".to_string(),
///     base_salary: 300000,
///     dependents: 2,
///     municipality: "東京都千代田区".to_string(),
/// };
///
/// let resolver = PayslipResolver::default();
/// let resolution = resolver.resolve(&employee, &[], Period::new(2024, 3).unwrap(), None);
///
/// assert_eq!(resolution.source(), ResolutionSource::Synthesized);
/// assert_eq!(resolution.record().gross_pay, 315000);
/// assert_eq!(resolution.record().net_pay, 243496);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PayslipResolver {
    fallback: FallbackConfig,
    rates: DeductionRates,
}

impl PayslipResolver {
    /// Creates a resolver using the given payroll configuration.
    pub fn new(config: &PayrollConfig) -> Self {
        Self {
            fallback: config.fallback.clone(),
            rates: config.deduction_rates.clone(),
        }
    }

    /// Resolves the record for `requested`, stamping synthesized records
    /// with the current time.
    ///
    /// Records are matched on `employee.id`.
    pub fn resolve(
        &self,
        employee: &Employee,
        records: &[PayrollRecord],
        requested: Period,
        explicit_fallback: Option<&PayrollRecord>,
    ) -> Resolution {
        self.resolve_at(employee, records, requested, explicit_fallback, Utc::now())
    }

    /// Resolves the record for `requested` with an explicit clock.
    ///
    /// Order of preference: the employee's record for the period, then the
    /// explicit fallback, then a synthesized record. Whatever the source,
    /// `total_deductions` and `net_pay` are recomputed from their components.
    pub fn resolve_at(
        &self,
        employee: &Employee,
        records: &[PayrollRecord],
        requested: Period,
        explicit_fallback: Option<&PayrollRecord>,
        now: DateTime<Utc>,
    ) -> Resolution {
        let resolution = if let Some(record) = find_record(&employee.id, records, requested) {
            Resolution::Found(with_consistent_totals(record.clone()))
        } else if let Some(record) = explicit_fallback {
            Resolution::Fallback(with_consistent_totals(record.clone()))
        } else {
            Resolution::Synthesized(self.synthesize(employee, requested, now))
        };

        debug!(
            employee_id = %employee.id,
            period = %requested,
            source = resolution.source().as_str(),
            net_pay = resolution.record().net_pay,
            "Resolved payslip"
        );

        resolution
    }

    /// Builds a placeholder record for `period` from the employee's base
    /// salary, the configured fallback components and deduction rates.
    pub fn synthesize(
        &self,
        employee: &Employee,
        period: Period,
        now: DateTime<Utc>,
    ) -> PayrollRecord {
        let gross_pay = employee
            .base_salary
            .saturating_add(self.fallback.overtime)
            .saturating_add(self.fallback.bonus);
        let deductions = calculate_deductions(gross_pay, &self.rates);

        with_consistent_totals(PayrollRecord {
            employee_id: employee.id.clone(),
            year: period.year,
            month: period.month.to_string(),
            base_salary: employee.base_salary,
            overtime: self.fallback.overtime,
            bonus: self.fallback.bonus,
            gross_pay,
            income_tax: deductions.income_tax,
            employee_insurance: deductions.employee_insurance,
            health_insurance: deductions.health_insurance,
            pension_insurance: deductions.pension_insurance,
            total_deductions: 0,
            net_pay: 0,
            created_at: now,
        })
    }
}

fn with_consistent_totals(mut record: PayrollRecord) -> PayrollRecord {
    record.recompute_totals();
    record
}
