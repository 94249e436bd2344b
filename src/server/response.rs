//! Response bodies and the mapping from failures to HTTP statuses.

use crate::error::Error;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::Value;
use tracing::error;

/// Endpoints listed in 404 responses.
pub const AVAILABLE_ENDPOINTS: &[&str] = &[
    "GET /health",
    "POST /calculate",
    "POST /calcular (legacy)",
];

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub service: &'static str,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalculationData {
    pub start_date: Value,
    pub business_days: Value,
    pub end_date: String,
}

#[derive(Debug, Serialize)]
pub struct CalculationResponse {
    pub success: bool,
    pub data: CalculationData,
}

impl CalculationResponse {
    pub fn success(data: CalculationData) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    required_fields: Option<Vec<&'static str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    available_endpoints: Option<Vec<&'static str>>,
}

impl ErrorBody {
    fn new(error: &'static str, message: impl Into<String>) -> Self {
        Self {
            error,
            message: message.into(),
            required_fields: None,
            available_endpoints: None,
        }
    }
}

/// Failures surfaced by the HTTP layer.
#[derive(Debug)]
pub enum ApiError {
    InvalidJson,
    MissingFields,
    Validation(String),
    Internal(String),
    NotFound { method: String, path: String },
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation(message) => ApiError::Validation(message),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::InvalidJson => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new("Bad Request", "Invalid JSON in request body"),
            ),
            ApiError::MissingFields => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    required_fields: Some(vec!["startDate", "businessDays"]),
                    ..ErrorBody::new(
                        "Missing required fields",
                        "Both startDate and businessDays are required",
                    )
                },
            ),
            ApiError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new("Validation Error", message),
            ),
            ApiError::Internal(detail) => {
                error!("Business day calculation error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new(
                        "Internal Server Error",
                        "An error occurred while calculating business days",
                    ),
                )
            }
            ApiError::NotFound { method, path } => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    available_endpoints: Some(AVAILABLE_ENDPOINTS.to_vec()),
                    ..ErrorBody::new("Not Found", format!("Route {method} {path} not found"))
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}
