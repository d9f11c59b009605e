//! Configuration types for payslip resolution and export.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::export::ExportStrategy;

/// Fixed deduction rates applied to gross pay when a record is synthesized.
///
/// Rates are fractions of gross pay (0.08 means 8%).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionRates {
    /// Income tax withholding rate.
    pub income_tax: Decimal,
    /// Employment insurance premium rate.
    pub employee_insurance: Decimal,
    /// Health insurance premium rate.
    pub health_insurance: Decimal,
    /// Employees' pension insurance premium rate.
    pub pension_insurance: Decimal,
}

impl Default for DeductionRates {
    fn default() -> Self {
        Self {
            income_tax: Decimal::new(8, 2),
            employee_insurance: Decimal::new(6, 3),
            health_insurance: Decimal::new(495, 4),
            pension_insurance: Decimal::new(915, 4),
        }
    }
}

impl DeductionRates {
    /// Returns each rate paired with its configuration key.
    pub fn named(&self) -> [(&'static str, Decimal); 4] {
        [
            ("income_tax", self.income_tax),
            ("employee_insurance", self.employee_insurance),
            ("health_insurance", self.health_insurance),
            ("pension_insurance", self.pension_insurance),
        ]
    }
}

/// Gross components used for a synthesized record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackConfig {
    /// Overtime allowance added to the employee's base salary.
    pub overtime: i64,
    /// Bonus added to the employee's base salary.
    #[serde(default)]
    pub bonus: i64,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            overtime: 15000,
            bonus: 0,
        }
    }
}

/// Payroll configuration from payroll.yaml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollConfig {
    /// Gross components of a synthesized record.
    pub fallback: FallbackConfig,
    /// Deduction rates of a synthesized record.
    pub deduction_rates: DeductionRates,
}

/// Export configuration from export.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Document type used as the file name prefix.
    pub document_type: String,
    /// Title printed at the top of the document.
    pub title: String,
    /// The exporter used when the caller does not pick one.
    pub strategy: ExportStrategy,
    /// Directory exported artifacts are saved to.
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            document_type: "給与明細".to_string(),
            title: "給与明細書".to_string(),
            strategy: ExportStrategy::Pdf,
            output_dir: PathBuf::from("./payslips"),
        }
    }
}

/// The complete configuration loaded from a configuration directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipConfig {
    /// Resolver defaults.
    pub payroll: PayrollConfig,
    /// Export settings.
    pub export: ExportConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_default_deduction_rates() {
        let rates = DeductionRates::default();
        assert_eq!(rates.income_tax, dec("0.08"));
        assert_eq!(rates.employee_insurance, dec("0.006"));
        assert_eq!(rates.health_insurance, dec("0.0495"));
        assert_eq!(rates.pension_insurance, dec("0.0915"));
    }

    #[test]
    fn test_default_fallback_overtime_is_15000() {
        let fallback = FallbackConfig::default();
        assert_eq!(fallback.overtime, 15000);
        assert_eq!(fallback.bonus, 0);
    }

    #[test]
    fn test_deserialize_payroll_config_from_yaml() {
        let yaml = r#"
fallback:
  overtime: 20000
deduction_rates:
  income_tax: "0.1"
  employee_insurance: "0.005"
  health_insurance: "0.05"
  pension_insurance: "0.0915"
"#;
        let config: PayrollConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.fallback.overtime, 20000);
        assert_eq!(config.fallback.bonus, 0);
        assert_eq!(config.deduction_rates.income_tax, dec("0.1"));
    }

    #[test]
    fn test_deserialize_export_config_from_yaml() {
        let yaml = r#"
document_type: 給与明細
title: 給与明細書
strategy: print_view
output_dir: /tmp/payslips
"#;
        let config: ExportConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.strategy, ExportStrategy::PrintView);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/payslips"));
    }

    #[test]
    fn test_named_rates_cover_all_four_deductions() {
        let names: Vec<&str> = DeductionRates::default()
            .named()
            .iter()
            .map(|(name, _)| *name)
            .collect();
        assert_eq!(
            names,
            vec![
                "income_tax",
                "employee_insurance",
                "health_insurance",
                "pension_insurance"
            ]
        );
    }
}
