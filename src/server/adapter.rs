//! Request body adapters for the calculation endpoints.

use super::response::ApiError;
use crate::error::Error;
use serde_json::{Map, Value};

pub const START_DATE_FIELD: &str = "startDate";
pub const BUSINESS_DAYS_FIELD: &str = "businessDays";

/// Legacy field names accepted by `POST /calcular`, paired with their
/// canonical names.
pub const LEGACY_FIELD_NAMES: &[(&str, &str)] = &[
    ("dataInicial", START_DATE_FIELD),
    ("diasUteis", BUSINESS_DAYS_FIELD),
];

/// Raw calculation fields as sent by the client. Kept as JSON so the response
/// can echo them back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationInput {
    pub start_date: Value,
    pub business_days: Value,
}

/// Parse a request body. An empty body reads as an empty object.
pub fn parse_body(body: &[u8]) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body).map_err(|_| ApiError::InvalidJson)
}

/// Rebuild a legacy body using canonical field names. Only the mapped fields
/// are carried over.
pub fn from_legacy(body: &Value) -> Value {
    let mapped = LEGACY_FIELD_NAMES
        .iter()
        .filter_map(|(legacy, canonical)| {
            body.get(*legacy)
                .map(|value| (canonical.to_string(), value.clone()))
        })
        .collect::<Map<String, Value>>();
    Value::Object(mapped)
}

/// Pull both fields out of a canonical body, rejecting absent or empty ones.
pub fn extract_input(body: &Value) -> Result<CalculationInput, ApiError> {
    let start_date = body.get(START_DATE_FIELD).cloned().unwrap_or(Value::Null);
    let business_days = body
        .get(BUSINESS_DAYS_FIELD)
        .cloned()
        .unwrap_or(Value::Null);

    if is_blank(&start_date) || is_blank(&business_days) {
        return Err(ApiError::MissingFields);
    }

    Ok(CalculationInput {
        start_date,
        business_days,
    })
}

impl CalculationInput {
    pub fn start_date_text(&self) -> Result<&str, Error> {
        self.start_date.as_str().ok_or_else(|| {
            Error::validation("Start date must be a valid string in YYYY-MM-DD format")
        })
    }

    /// The business-day count as a whole number. `5` and `5.0` are accepted;
    /// fractions, strings and booleans are not.
    pub fn business_days_count(&self) -> Result<i64, Error> {
        let invalid = || Error::validation("Business days must be a positive integer");

        match &self.business_days {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(i)
                } else if let Some(f) = n.as_f64() {
                    if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                        Ok(f as i64)
                    } else {
                        Err(invalid())
                    }
                } else {
                    Err(invalid())
                }
            }
            _ => Err(invalid()),
        }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(_) | Value::Object(_) => false,
    }
}
