//! HTTP API module for the payslip engine.
//!
//! This module provides the REST endpoints for resolving a payslip for a
//! period and exporting it as a document.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ExportRequest, PayslipRequest};
pub use response::{ApiError, NavigationView, PayslipResponse};
pub use state::AppState;
