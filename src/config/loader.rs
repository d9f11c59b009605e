//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payslip
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{DeductionRates, ExportConfig, FallbackConfig, PayrollConfig, PayslipConfig};

/// Loads, validates and provides access to payslip configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/default/
/// ├── payroll.yaml   # Fallback overtime/bonus and deduction rates
/// └── export.yaml    # Document type, title, export strategy, output dir
/// ```
///
/// # Example
///
/// ```no_run
/// use payslip_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("Income tax rate: {}", loader.deduction_rates().income_tax);
/// # Ok::<(), payslip_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: PayslipConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if:
    /// - Either file is missing (`ConfigNotFound`)
    /// - Either file contains invalid YAML or misses a field (`ConfigParseError`)
    /// - A value is out of range (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let payroll = Self::load_yaml::<PayrollConfig>(&path.join("payroll.yaml"))?;
        let export = Self::load_yaml::<ExportConfig>(&path.join("export.yaml"))?;

        let loader = Self::from_config(PayslipConfig { payroll, export })?;
        debug!(path = %path.display(), "Loaded payslip configuration");
        Ok(loader)
    }

    /// Wraps an already-built configuration after validating it.
    pub fn from_config(config: PayslipConfig) -> EngineResult<Self> {
        validate_fallback(&config.payroll.fallback)?;
        validate_rates(&config.payroll.deduction_rates)?;
        validate_export(&config.export)?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &PayslipConfig {
        &self.config
    }

    /// Returns the payroll section.
    pub fn payroll(&self) -> &PayrollConfig {
        &self.config.payroll
    }

    /// Returns the deduction rates used for synthesized records.
    pub fn deduction_rates(&self) -> &DeductionRates {
        &self.config.payroll.deduction_rates
    }

    /// Returns the export section.
    pub fn export(&self) -> &ExportConfig {
        &self.config.export
    }
}

fn validate_fallback(fallback: &FallbackConfig) -> EngineResult<()> {
    if fallback.overtime < 0 {
        return Err(EngineError::InvalidConfig {
            field: "fallback.overtime".to_string(),
            message: format!("must not be negative, got {}", fallback.overtime),
        });
    }
    if fallback.bonus < 0 {
        return Err(EngineError::InvalidConfig {
            field: "fallback.bonus".to_string(),
            message: format!("must not be negative, got {}", fallback.bonus),
        });
    }
    Ok(())
}

fn validate_rates(rates: &DeductionRates) -> EngineResult<()> {
    for (name, rate) in rates.named() {
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(EngineError::InvalidConfig {
                field: format!("deduction_rates.{}", name),
                message: format!("must be between 0 and 1, got {}", rate),
            });
        }
    }
    Ok(())
}

fn validate_export(export: &ExportConfig) -> EngineResult<()> {
    if export.document_type.trim().is_empty() {
        return Err(EngineError::InvalidConfig {
            field: "document_type".to_string(),
            message: "must not be empty".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportStrategy;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/default"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.payroll().fallback.overtime, 15000);
        assert_eq!(loader.payroll().fallback.bonus, 0);
        assert_eq!(loader.export().document_type, "給与明細");
        assert_eq!(loader.export().title, "給与明細書");
        assert_eq!(loader.export().strategy, ExportStrategy::Pdf);
    }

    #[test]
    fn test_loaded_rates_match_defaults() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let rates = loader.deduction_rates();

        assert_eq!(rates.income_tax, dec("0.08"));
        assert_eq!(rates.employee_insurance, dec("0.006"));
        assert_eq!(rates.health_insurance, dec("0.0495"));
        assert_eq!(rates.pension_insurance, dec("0.0915"));
        assert_eq!(rates, &DeductionRates::default());
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("payroll.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_rate_above_one_is_rejected() {
        let mut config = PayslipConfig::default();
        config.payroll.deduction_rates.health_insurance = dec("4.95");

        match ConfigLoader::from_config(config) {
            Err(EngineError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "deduction_rates.health_insurance");
            }
            other => panic!("Expected InvalidConfig error, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_rate_is_rejected() {
        let mut config = PayslipConfig::default();
        config.payroll.deduction_rates.income_tax = dec("-0.01");

        assert!(matches!(
            ConfigLoader::from_config(config),
            Err(EngineError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_negative_overtime_is_rejected() {
        let mut config = PayslipConfig::default();
        config.payroll.fallback.overtime = -1;

        match ConfigLoader::from_config(config) {
            Err(EngineError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "fallback.overtime");
            }
            other => panic!("Expected InvalidConfig error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_document_type_is_rejected() {
        let mut config = PayslipConfig::default();
        config.export.document_type = "  ".to_string();

        assert!(matches!(
            ConfigLoader::from_config(config),
            Err(EngineError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_default_loader_uses_builtin_defaults() {
        let loader = ConfigLoader::default();
        assert_eq!(loader.payroll().fallback.overtime, 15000);
        assert_eq!(loader.deduction_rates(), &DeductionRates::default());
    }
}
