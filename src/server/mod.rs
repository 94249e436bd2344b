//! REST API for business day calculations

pub mod adapter;
pub mod response;

use crate::calculator::BusinessDayCalculator;
use adapter::{extract_input, from_legacy, parse_body};
use anyhow::Result;
use axum::{
    body::Bytes,
    extract::State,
    http::{Method, Uri},
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::{SecondsFormat, Utc};
use response::{ApiError, CalculationData, CalculationResponse, HealthResponse};
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{debug, info};

/// HTTP server exposing a shared [`BusinessDayCalculator`]
pub struct ApiServer {
    calculator: Arc<BusinessDayCalculator>,
    addr: String,
}

impl ApiServer {
    pub fn new(calculator: Arc<BusinessDayCalculator>, addr: impl Into<String>) -> Self {
        Self {
            calculator,
            addr: addr.into(),
        }
    }

    /// Bind and serve until the process exits
    pub async fn start(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        let local = listener.local_addr()?;

        info!("Business Day Calculator API running on {}", local);
        info!("Health check: http://{}/health", local);
        info!("Calculate endpoint: http://{}/calculate", local);

        axum::serve(listener, build_router(self.calculator)).await?;
        Ok(())
    }
}

/// Shared API state
#[derive(Clone)]
struct ApiState {
    calculator: Arc<BusinessDayCalculator>,
}

/// Build the API router
pub fn build_router(calculator: Arc<BusinessDayCalculator>) -> Router {
    let shared_state = Arc::new(ApiState { calculator });

    Router::new()
        .route("/health", get(health_check).fallback(not_found))
        .route("/calculate", post(calculate).fallback(not_found))
        .route("/calcular", post(calculate_legacy).fallback(not_found))
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        service: "Business Day Calculator API",
    })
}

async fn calculate(
    State(state): State<Arc<ApiState>>,
    body: Bytes,
) -> Result<Json<CalculationResponse>, ApiError> {
    let body = parse_body(&body)?;
    run_calculation(&state, &body).await
}

async fn calculate_legacy(
    State(state): State<Arc<ApiState>>,
    body: Bytes,
) -> Result<Json<CalculationResponse>, ApiError> {
    let body = parse_body(&body)?;
    run_calculation(&state, &from_legacy(&body)).await
}

async fn run_calculation(
    state: &ApiState,
    body: &Value,
) -> Result<Json<CalculationResponse>, ApiError> {
    let input = extract_input(body)?;
    let start_date = input.start_date_text()?;
    let business_days = input.business_days_count()?;

    let end_date = state
        .calculator
        .calculate_end_date(start_date, business_days)
        .await?;

    debug!("Calculated {} for {} + {}", end_date, start_date, business_days);

    Ok(Json(CalculationResponse::success(CalculationData {
        start_date: input.start_date.clone(),
        business_days: input.business_days.clone(),
        end_date: end_date.to_string(),
    })))
}

async fn not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::NotFound {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}
