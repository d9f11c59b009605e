//! Response types for the payslip API.
//!
//! This module defines the payslip view returned by `POST /payslip`, the
//! error response structures and the mapping from engine errors.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::calculation::{Direction, PeriodNavigator, Resolution};
use crate::error::EngineError;
use crate::models::Period;

/// Response body for `POST /payslip`.
#[derive(Debug, Clone, Serialize)]
pub struct PayslipResponse {
    /// The resolved record and its source, as `source` and `record` keys.
    #[serde(flatten)]
    pub resolution: Resolution,
    /// The employee's record periods, most recent first.
    pub periods: Vec<Period>,
    /// State of the period controls.
    pub navigation: NavigationView,
}

/// The period selection and the targets of the previous/next controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationView {
    /// The selected period.
    pub selected: Period,
    /// Payslip heading for the selected period, e.g. `2024年3月分`.
    pub heading: String,
    /// The next older period; `None` disables the "previous" control.
    pub previous: Option<Period>,
    /// The next newer period; `None` disables the "next" control.
    pub next: Option<Period>,
}

impl From<&PeriodNavigator> for NavigationView {
    fn from(navigator: &PeriodNavigator) -> Self {
        Self {
            selected: navigator.selected(),
            heading: navigator.selected().heading(),
            previous: navigator.peek(Direction::Previous),
            next: navigator.peek(Direction::Next),
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an invalid period error response.
    pub fn invalid_period(message: impl Into<String>) -> Self {
        Self::with_details(
            "INVALID_PERIOD",
            message,
            "Periods are {\"year\", \"month\"} objects or \"YYYY-M\" strings with month 1-12",
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidConfig { field, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Invalid configuration",
                    format!("{}: {}", field, message),
                ),
            },
            error @ EngineError::InvalidPeriod { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::invalid_period(error.to_string()),
            },
            EngineError::ExportFailed { strategy, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "EXPORT_FAILED",
                    format!("Export via {} failed", strategy),
                    message,
                ),
            },
            EngineError::Io { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "IO_ERROR",
                    "I/O error",
                    format!("{}: {}", path, message),
                ),
            },
        }
    }
}
