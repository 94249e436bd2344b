//! # Bizdays
//!
//! Computes the date reached after adding a number of business days to a
//! start date, skipping weekends and national holidays fetched from a public
//! holiday API.
//!
//! ## Usage
//!
//! ```bash
//! bizdays serve --port 3001
//! bizdays calculate --start-date 2025-11-21 --business-days 2
//! ```
//!
//! ## Modules
//!
//! - `calendar` - Date-only values, weekend definitions and holiday sets
//! - `holidays` - Holiday sources, the year-keyed cache and the provider
//! - `calculator` - Input validation, year selection and the business-day walk
//! - `config` - Layered configuration (defaults, TOML file, environment)
//! - `server` - HTTP endpoints and request adapters
//! - `error` - Error types shared by every module
pub mod calculator;
pub mod calendar;
pub mod config;
pub mod error;
pub mod holidays;
pub mod server;

pub use calculator::{BusinessDayCalculator, BusinessDayRequest, CalculatorSettings};
pub use calendar::{CalendarDate, HolidaySet, WeekendDays};
pub use error::{Error, Result};
