//! Payroll record model.
//!
//! A [`PayrollRecord`] is one employee's payroll for one monthly period.
//! Records arrive from the upstream data source as camelCase JSON with the
//! month encoded as a string.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Period;

/// One employee's payroll for one (year, month) period.
///
/// All amounts are whole yen. `total_deductions` and `net_pay` are derived
/// fields; call [`PayrollRecord::recompute_totals`] before handing a record
/// to a consumer.
///
/// # Example
///
/// ```
/// use payslip_engine::models::{PayrollRecord, Period};
///
/// let json = r#"{
///     "employeeId": "emp_001",
///     "year": 2024,
///     "month": "3",
///     "baseSalary": 300000,
///     "overtime": 20000,
///     "bonus": 0,
///     "grossPay": 320000,
///     "incomeTax": 25600,
///     "employeeInsurance": 1920,
///     "healthInsurance": 15840,
///     "pensionInsurance": 29280,
///     "totalDeductions": 0,
///     "netPay": 0,
///     "createdAt": "2024-03-25T09:00:00Z"
/// }"#;
///
/// let mut record: PayrollRecord = serde_json::from_str(json).unwrap();
/// assert_eq!(record.period(), Some(Period::new(2024, 3).unwrap()));
///
/// record.recompute_totals();
/// assert_eq!(record.total_deductions, 72640);
/// assert_eq!(record.net_pay, 247360);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollRecord {
    /// The employee this record belongs to.
    pub employee_id: String,
    /// Calendar year of the period.
    pub year: i32,
    /// Calendar month of the period, string-encoded ("1" through "12").
    pub month: String,
    /// Base salary component of gross pay.
    pub base_salary: i64,
    /// Overtime component of gross pay.
    pub overtime: i64,
    /// Bonus component of gross pay.
    #[serde(default)]
    pub bonus: i64,
    /// Sum of the gross components.
    pub gross_pay: i64,
    /// Withheld income tax.
    pub income_tax: i64,
    /// Employment insurance premium.
    pub employee_insurance: i64,
    /// Health insurance premium.
    pub health_insurance: i64,
    /// Employees' pension insurance premium.
    pub pension_insurance: i64,
    /// Sum of the four deduction components.
    #[serde(default)]
    pub total_deductions: i64,
    /// Gross pay minus total deductions.
    #[serde(default)]
    pub net_pay: i64,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl PayrollRecord {
    /// Returns the record's period, or `None` if its month string is not a
    /// valid month.
    pub fn period(&self) -> Option<Period> {
        Period::from_record_fields(self.year, &self.month)
    }

    /// Returns true if this record belongs to `employee_id` for `period`.
    pub fn matches(&self, employee_id: &str, period: Period) -> bool {
        self.employee_id == employee_id && self.period() == Some(period)
    }

    /// Sum of the four deduction components, saturating at the `i64`
    /// bounds.
    pub fn deduction_sum(&self) -> i64 {
        self.income_tax
            .saturating_add(self.employee_insurance)
            .saturating_add(self.health_insurance)
            .saturating_add(self.pension_insurance)
    }

    /// Overwrites `total_deductions` and `net_pay` from the deduction
    /// components and gross pay.
    pub fn recompute_totals(&mut self) {
        self.total_deductions = self.deduction_sum();
        self.net_pay = self.gross_pay.saturating_sub(self.total_deductions);
    }

    /// Returns true if both derived totals agree with their components.
    pub fn totals_consistent(&self) -> bool {
        self.total_deductions == self.deduction_sum()
            && self.net_pay == self.gross_pay.saturating_sub(self.total_deductions)
    }

    /// The first amount field whose absolute value exceeds `limit`, with
    /// its wire name.
    pub fn amount_out_of_range(&self, limit: i64) -> Option<(&'static str, i64)> {
        [
            ("baseSalary", self.base_salary),
            ("overtime", self.overtime),
            ("bonus", self.bonus),
            ("grossPay", self.gross_pay),
            ("incomeTax", self.income_tax),
            ("employeeInsurance", self.employee_insurance),
            ("healthInsurance", self.health_insurance),
            ("pensionInsurance", self.pension_insurance),
        ]
        .into_iter()
        .find(|(_, amount)| !(-limit..=limit).contains(amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn create_test_record() -> PayrollRecord {
        PayrollRecord {
            employee_id: "emp_001".to_string(),
            year: 2024,
            month: "3".to_string(),
            base_salary: 300000,
            overtime: 15000,
            bonus: 0,
            gross_pay: 315000,
            income_tax: 25200,
            employee_insurance: 1890,
            health_insurance: 15592,
            pension_insurance: 28822,
            total_deductions: 0,
            net_pay: 0,
            created_at: Utc.with_ymd_and_hms(2024, 3, 25, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_recompute_totals_overwrites_stale_values() {
        let mut record = create_test_record();
        record.total_deductions = 1;
        record.net_pay = 999;

        record.recompute_totals();

        assert_eq!(record.total_deductions, 71504);
        assert_eq!(record.net_pay, 243496);
        assert!(record.totals_consistent());
    }

    #[test]
    fn test_totals_consistent_detects_stale_values() {
        let record = create_test_record();
        assert!(!record.totals_consistent());
    }

    #[test]
    fn test_period_parses_string_month() {
        let record = create_test_record();
        assert_eq!(record.period(), Some(Period::new(2024, 3).unwrap()));
    }

    #[test]
    fn test_period_is_none_for_invalid_month() {
        let mut record = create_test_record();
        record.month = "13".to_string();
        assert_eq!(record.period(), None);
    }

    #[test]
    fn test_matches_requires_employee_and_period() {
        let record = create_test_record();
        let march = Period::new(2024, 3).unwrap();
        let april = Period::new(2024, 4).unwrap();

        assert!(record.matches("emp_001", march));
        assert!(!record.matches("emp_002", march));
        assert!(!record.matches("emp_001", april));
    }

    #[test]
    fn test_net_pay_can_go_negative() {
        let mut record = create_test_record();
        record.gross_pay = 50000;
        record.recompute_totals();
        assert_eq!(record.net_pay, 50000 - 71504);
    }

    #[test]
    fn test_recompute_totals_saturates_instead_of_overflowing() {
        let mut record = create_test_record();
        record.income_tax = i64::MAX;
        record.employee_insurance = i64::MAX;
        record.gross_pay = i64::MIN;

        record.recompute_totals();

        assert_eq!(record.total_deductions, i64::MAX);
        assert_eq!(record.net_pay, i64::MIN);
        assert!(record.totals_consistent());
    }

    #[test]
    fn test_amount_out_of_range() {
        let mut record = create_test_record();
        assert_eq!(record.amount_out_of_range(1_000_000), None);

        record.bonus = -2_000_000;
        assert_eq!(record.amount_out_of_range(1_000_000), Some(("bonus", -2_000_000)));

        record.bonus = 0;
        record.pension_insurance = i64::MIN;
        assert_eq!(
            record.amount_out_of_range(1_000_000),
            Some(("pensionInsurance", i64::MIN))
        );
    }

    #[test]
    fn test_deserialize_without_derived_fields() {
        let json = r#"{
            "employeeId": "emp_001",
            "year": 2023,
            "month": "12",
            "baseSalary": 300000,
            "overtime": 0,
            "grossPay": 300000,
            "incomeTax": 24000,
            "employeeInsurance": 1800,
            "healthInsurance": 14850,
            "pensionInsurance": 27450,
            "createdAt": "2023-12-25T00:00:00.000Z"
        }"#;

        let record: PayrollRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.bonus, 0);
        assert_eq!(record.total_deductions, 0);
        assert_eq!(record.period(), Some(Period::new(2023, 12).unwrap()));
    }

    #[test]
    fn test_serialize_uses_camel_case_and_string_month() {
        let record = create_test_record();
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"employeeId\":\"emp_001\""));
        assert!(json.contains("\"month\":\"3\""));
        assert!(json.contains("\"grossPay\":315000"));
    }
}
