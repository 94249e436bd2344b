//! Business day arithmetic
//!
//! `BusinessDayCalculator` validates input, asks the holiday provider for
//! every year the selection rule names, and walks forward from the start
//! date. Each walk runs over holiday data resolved beforehand; nothing is
//! fetched mid-traversal. When a walk ends in a year that was not loaded,
//! the missing years are fetched and the walk is repeated from the start.

pub mod request;
pub mod walk;
pub mod years;

pub use request::BusinessDayRequest;
pub use walk::advance_business_days;
pub use years::{
    check_year_span, YearSelection, YearSelectionMode, DEFAULT_NEXT_YEAR_THRESHOLD, MAX_YEAR_SPAN,
};

use crate::calendar::{CalendarDate, WeekendDays};
use crate::config::AppConfig;
use crate::error::Result;
use crate::holidays::{HolidayCache, HolidayProvider, HttpHolidaySource};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

/// Rules applied by a [`BusinessDayCalculator`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalculatorSettings {
    pub weekend: WeekendDays,
    pub year_selection: YearSelection,
}

pub struct BusinessDayCalculator {
    provider: Arc<HolidayProvider>,
    settings: CalculatorSettings,
}

impl BusinessDayCalculator {
    pub fn new(provider: Arc<HolidayProvider>, settings: CalculatorSettings) -> Self {
        Self { provider, settings }
    }

    /// Wire a calculator against the configured HTTP holiday source.
    pub fn from_config(config: &AppConfig, cache: HolidayCache) -> Result<Self> {
        let source = HttpHolidaySource::new(&config.holidays.base_url, config.holiday_timeout())?;
        let provider = HolidayProvider::new(Arc::new(source), cache);
        Ok(Self::new(Arc::new(provider), config.calculator_settings()))
    }

    pub fn provider(&self) -> &Arc<HolidayProvider> {
        &self.provider
    }

    /// Date reached after adding `business_days_to_add` business days to the
    /// date written in `start_date_text`.
    ///
    /// Invalid input fails with a validation error before any holiday lookup.
    pub async fn calculate_end_date(
        &self,
        start_date_text: &str,
        business_days_to_add: i64,
    ) -> Result<CalendarDate> {
        let request = BusinessDayRequest::new(start_date_text, business_days_to_add)?;
        self.calculate(&request).await
    }

    pub async fn calculate(&self, request: &BusinessDayRequest) -> Result<CalendarDate> {
        let start = request.start_date();
        let target = request.business_days();

        let selection = self.settings.year_selection;
        let mut years = selection.relevant_years(start, target)?;
        let mut holidays = self.provider.get_holidays_for_years(&years).await;
        let mut end = advance_business_days(start, target, &holidays, &self.settings.weekend)?;

        while selection.extends_to_end_year() {
            let Some(&loaded_through) = years.last() else {
                break;
            };
            if end.year() <= loaded_through {
                break;
            }
            check_year_span(start.year(), end.year())?;

            let missing: BTreeSet<i32> = (loaded_through + 1..=end.year()).collect();
            debug!(
                "Walk from {} ended in {} past loaded years; loading {:?}",
                start,
                end.year(),
                missing
            );
            holidays.merge(&self.provider.get_holidays_for_years(&missing).await);
            years.extend(missing);
            end = advance_business_days(start, target, &holidays, &self.settings.weekend)?;
        }

        debug!(
            "{} + {} business days = {} (years {:?}, {} holidays)",
            start,
            target,
            end,
            years,
            holidays.len()
        );

        Ok(end)
    }
}
