//! Choosing which years of holiday data a calculation needs.

use crate::calendar::CalendarDate;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Calendar days added to the weekend-only span to absorb holidays.
const HOLIDAY_ALLOWANCE_DAYS: u64 = 31;

/// Most calendar years a single calculation may load holidays for.
pub const MAX_YEAR_SPAN: i32 = 100;

/// Count above which the threshold policy also loads the following year.
pub const DEFAULT_NEXT_YEAR_THRESHOLD: u32 = 200;

/// Configured name of a year-selection rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum YearSelectionMode {
    /// Every year up to the one the walk ends in.
    #[default]
    Spanning,
    /// Start year, plus the next one past a threshold.
    NextYearThreshold,
}

impl std::str::FromStr for YearSelectionMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "spanning" => Ok(Self::Spanning),
            "next_year_threshold" => Ok(Self::NextYearThreshold),
            other => Err(format!("unknown year selection mode: {other}")),
        }
    }
}

/// Rule deciding which years' holidays are fetched before the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearSelection {
    /// `{start.year}`, plus `start.year + 1` when the count exceeds
    /// `threshold`. Under-fetches when a long horizon crosses a second year
    /// boundary; the missing year then reads as holiday-free.
    NextYearThreshold { threshold: u32 },
    /// Every year from the start year through the year of
    /// `start + ceil(n / 5) weeks + 31 days`. This is a first estimate: the
    /// calculator loads further years when the walk ends past it.
    #[default]
    Spanning,
}

impl YearSelection {
    pub fn from_mode(mode: YearSelectionMode, threshold: u32) -> Self {
        match mode {
            YearSelectionMode::Spanning => YearSelection::Spanning,
            YearSelectionMode::NextYearThreshold => YearSelection::NextYearThreshold { threshold },
        }
    }

    pub fn relevant_years(&self, start: CalendarDate, business_days: u32) -> Result<BTreeSet<i32>> {
        let first = start.year();

        let weeks = u64::from(business_days).div_ceil(5);
        let days = weeks * 7 + HOLIDAY_ALLOWANCE_DAYS;
        if days > MAX_YEAR_SPAN as u64 * 366 {
            return Err(span_error());
        }
        let estimated_last = start.plus_days(days)?.year();
        check_year_span(first, estimated_last)?;

        let last = match *self {
            YearSelection::NextYearThreshold { threshold } => {
                if business_days > threshold {
                    first + 1
                } else {
                    first
                }
            }
            YearSelection::Spanning => estimated_last,
        };

        Ok((first..=last).collect())
    }

    /// Whether the calculator keeps loading years until the end date's year
    /// is covered.
    pub fn extends_to_end_year(&self) -> bool {
        matches!(self, YearSelection::Spanning)
    }
}

/// Reject a calculation whose holidays would span more than
/// [`MAX_YEAR_SPAN`] years.
pub fn check_year_span(first: i32, last: i32) -> Result<()> {
    if i64::from(last) - i64::from(first) >= i64::from(MAX_YEAR_SPAN) {
        return Err(span_error());
    }
    Ok(())
}

fn span_error() -> Error {
    Error::validation(format!(
        "Business days must not reach more than {MAX_YEAR_SPAN} calendar years"
    ))
}
