//! Application state for the payslip API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::calculation::PayslipResolver;
use crate::config::ConfigLoader;

/// Shared application state.
///
/// Holds the loaded configuration and a resolver built from it. Both are
/// immutable once the server starts.
#[derive(Clone)]
pub struct AppState {
    /// The loaded payslip configuration.
    config: Arc<ConfigLoader>,
    /// Resolver configured with the fallback components and deduction rates.
    resolver: Arc<PayslipResolver>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        let resolver = PayslipResolver::new(config.payroll());
        Self {
            config: Arc::new(config),
            resolver: Arc::new(resolver),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the payslip resolver.
    pub fn resolver(&self) -> &PayslipResolver {
        &self.resolver
    }
}
