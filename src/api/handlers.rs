//! HTTP request handlers for the payslip API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::PeriodNavigator;
use crate::error::{EngineError, EngineResult};
use crate::export::{ExportArtifact, exporter_for, jst_date, save_artifact};

use super::request::{ExportRequest, PayslipRequest};
use super::response::{ApiError, ApiErrorResponse, NavigationView, PayslipResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payslip", post(payslip_handler))
        .route("/payslip/export", post(export_handler))
        .with_state(state)
}

/// Handler for POST /payslip.
///
/// Resolves the payslip for the requested period and reports the period
/// controls' state.
async fn payslip_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayslipRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payslip request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    if let Err(response) = check_amounts(correlation_id, &request) {
        return response;
    }

    let start_time = Instant::now();
    let response = resolve_payslip(&state, &request, jst_date(Utc::now()));

    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee.id,
        period = %response.navigation.selected,
        source = response.resolution.source().as_str(),
        duration_us = start_time.elapsed().as_micros(),
        "Payslip resolved"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(response),
    )
        .into_response()
}

/// Handler for POST /payslip/export.
///
/// Resolves the payslip like `/payslip`, then renders it with the requested
/// (or configured) strategy and returns the document as an attachment. With
/// `save` set, the document is also written to the configured output
/// directory.
async fn export_handler(
    State(state): State<AppState>,
    payload: Result<Json<ExportRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing export request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    if let Err(response) = check_amounts(correlation_id, &request.payslip) {
        return response;
    }

    let strategy = request
        .strategy
        .unwrap_or(state.config().export().strategy);
    let resolved = resolve_payslip(&state, &request.payslip, jst_date(Utc::now()));
    let period = resolved.navigation.selected;
    let record = resolved.resolution.into_record();
    let employee = request.payslip.employee;
    let employee_id = employee.id.clone();
    let exporter = exporter_for(strategy, state.config().export());
    let output_dir = request
        .save
        .then(|| state.config().export().output_dir.clone());

    let start_time = Instant::now();
    let result = tokio::task::spawn_blocking(move || -> EngineResult<ExportArtifact> {
        let artifact = exporter.export(&employee, &record)?;
        if let Some(dir) = output_dir {
            save_artifact(&dir, &artifact)?;
        }
        Ok(artifact)
    })
    .await
    .unwrap_or_else(|e| {
        Err(EngineError::ExportFailed {
            strategy: strategy.to_string(),
            message: format!("export task failed: {}", e),
        })
    });

    match result {
        Ok(artifact) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                period = %period,
                strategy = %strategy,
                bytes = artifact.bytes.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Payslip exported"
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, artifact.media_type.to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        content_disposition(&artifact.file_name),
                    ),
                ],
                artifact.bytes,
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                strategy = %strategy,
                error = %err,
                "Export failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Resolves the payslip for a request, defaulting the period to the month
/// containing `today`.
fn resolve_payslip(state: &AppState, request: &PayslipRequest, today: NaiveDate) -> PayslipResponse {
    let mut navigator =
        PeriodNavigator::for_employee(&request.employee.id, &request.records, today);
    if let Some(period) = request.period {
        navigator.select_period(period);
    }

    let resolution = state.resolver().resolve(
        &request.employee,
        &request.records,
        navigator.selected(),
        request.fallback.as_ref(),
    );

    PayslipResponse {
        resolution,
        periods: navigator.periods().to_vec(),
        navigation: NavigationView::from(&navigator),
    }
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's message, including period
            // validation failures.
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("Invalid period") {
                ApiError::invalid_period(body_text)
            } else if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    }
    .into_response()
}

fn check_amounts(correlation_id: Uuid, request: &PayslipRequest) -> Result<(), Response> {
    request.validate_amounts().map_err(|message| {
        warn!(
            correlation_id = %correlation_id,
            error = %message,
            "Amount out of range"
        );
        ApiErrorResponse {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::validation_error(message),
        }
        .into_response()
    })
}

/// `attachment` disposition with an RFC 5987 `filename*` parameter, so
/// Japanese file names survive header encoding.
fn content_disposition(file_name: &str) -> String {
    let mut encoded = String::with_capacity(file_name.len() * 3);
    for byte in file_name.bytes() {
        if byte.is_ascii_alphanumeric() || b"!#$&+-.^_`|~".contains(&byte) {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }
    format!("attachment; filename*=UTF-8''{}", encoded)
}
