//! Configuration loading and management for the payslip engine.
//!
//! This module loads the resolver defaults (fallback overtime and deduction
//! rates) and the export settings from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payslip_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Fallback overtime: {}", config.payroll().fallback.overtime);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{DeductionRates, ExportConfig, FallbackConfig, PayrollConfig, PayslipConfig};
