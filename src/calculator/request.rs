//! Validated calculation input.

use crate::calendar::CalendarDate;
use crate::error::{Error, Result};

/// A start date and a positive business-day count, checked at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessDayRequest {
    start_date: CalendarDate,
    business_days: u32,
}

impl BusinessDayRequest {
    /// Validate raw input. Checks run in a fixed order: presence of the
    /// date, then the count, then the date's layout and calendar validity.
    pub fn new(start_date_text: &str, business_days: i64) -> Result<Self> {
        if start_date_text.is_empty() {
            return Err(Error::validation(
                "Start date must be a valid string in YYYY-MM-DD format",
            ));
        }

        let business_days = u32::try_from(business_days)
            .ok()
            .filter(|&n| n >= 1)
            .ok_or_else(|| Error::validation("Business days must be a positive integer"))?;

        let start_date = CalendarDate::parse_strict(start_date_text)?;

        Ok(Self {
            start_date,
            business_days,
        })
    }

    pub fn start_date(&self) -> CalendarDate {
        self.start_date
    }

    pub fn business_days(&self) -> u32 {
        self.business_days
    }
}
