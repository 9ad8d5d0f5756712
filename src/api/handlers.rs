//! HTTP request handlers for the payment relay.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, info};

use crate::error::PaymentError;
use crate::service::PaymentService;
use crate::types::PaymentRecord;

/// Application state shared across handlers.
pub struct AppState {
    pub service: PaymentService,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check endpoint.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Error body returned when publishing fails.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Publish failure surfaced over HTTP.
pub struct ApiError(PaymentError);

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "Payment publish failed");
        let body = ErrorResponse {
            error: self.0.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Accept a payment and hand it to the service.
pub async fn send_payment(
    State(state): State<Arc<AppState>>,
    Json(record): Json<PaymentRecord>,
) -> Result<StatusCode, ApiError> {
    info!(amount = ?record.amount, "Received payment request");

    state.service.send(&record).await?;

    Ok(StatusCode::OK)
}
