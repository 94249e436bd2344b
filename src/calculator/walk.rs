//! The forward business-day walk.

use crate::calendar::{is_business_day, CalendarDate, HolidaySet, WeekendDays};
use crate::error::{Error, Result};

/// Date reached after counting `target` business days from `start`.
///
/// `start` counts as the first business day when it is one, so `target == 1`
/// on a business day returns `start` itself. Otherwise the walk advances one
/// calendar day at a time and counts each business day it lands on. Runs in
/// time proportional to the calendar days spanned.
pub fn advance_business_days(
    start: CalendarDate,
    target: u32,
    holidays: &HolidaySet,
    weekend: &WeekendDays,
) -> Result<CalendarDate> {
    if target == 0 {
        return Err(Error::Internal(
            "business day target must be at least one".to_string(),
        ));
    }
    if weekend.len() >= 7 {
        return Err(Error::Internal(
            "every day of the week is a weekend day".to_string(),
        ));
    }

    let mut current = start;
    let mut counted = 0u32;

    if is_business_day(&current, holidays, weekend) {
        counted = 1;
    }

    while counted < target {
        current = current.succ()?;
        if is_business_day(&current, holidays, weekend) {
            counted += 1;
        }
    }

    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(text: &str) -> CalendarDate {
        CalendarDate::parse_strict(text).unwrap()
    }

    fn holidays(dates: &[&str]) -> HolidaySet {
        dates.iter().map(|d| date(d)).collect()
    }

    fn walk(start: &str, n: u32, hol: &HolidaySet) -> String {
        advance_business_days(date(start), n, hol, &WeekendDays::default())
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_one_day_on_business_day_returns_start() {
        assert_eq!(walk("2025-11-17", 1, &HolidaySet::new()), "2025-11-17");
        assert_eq!(walk("2025-11-21", 1, &HolidaySet::new()), "2025-11-21");
    }

    #[test]
    fn test_skips_weekend() {
        assert_eq!(walk("2025-11-21", 2, &HolidaySet::new()), "2025-11-24");
        assert_eq!(walk("2025-11-17", 5, &HolidaySet::new()), "2025-11-21");
        assert_eq!(walk("2025-11-17", 6, &HolidaySet::new()), "2025-11-24");
    }

    #[test]
    fn test_weekend_start_not_counted() {
        assert_eq!(walk("2025-11-22", 1, &HolidaySet::new()), "2025-11-24");
        assert_eq!(walk("2025-11-23", 2, &HolidaySet::new()), "2025-11-25");
    }

    #[test]
    fn test_holiday_start_not_counted() {
        let hol = holidays(&["2025-11-20"]);
        assert_eq!(walk("2025-11-20", 1, &hol), "2025-11-21");
        assert_eq!(walk("2025-11-20", 2, &hol), "2025-11-24");
    }

    #[test]
    fn test_christmas_skipped() {
        let hol = holidays(&["2025-12-25"]);
        assert_eq!(walk("2025-12-24", 2, &hol), "2025-12-26");
        assert_eq!(walk("2025-12-24", 3, &hol), "2025-12-29");
    }

    #[test]
    fn test_crosses_year_boundary() {
        let hol = holidays(&["2025-12-25", "2026-01-01"]);
        assert_eq!(walk("2025-12-31", 2, &hol), "2026-01-02");
    }

    #[test]
    fn test_custom_weekend() {
        let weekend = WeekendDays::new([Weekday::Fri, Weekday::Sat]);
        let end = advance_business_days(date("2025-11-20"), 2, &HolidaySet::new(), &weekend)
            .unwrap();
        assert_eq!(end.to_string(), "2025-11-23");
    }

    #[test]
    fn test_result_is_never_weekend_or_holiday() {
        let hol = holidays(&["2025-11-20", "2025-12-25", "2026-01-01", "2026-02-16"]);
        let weekend = WeekendDays::default();
        let mut start = date("2025-11-01");
        for _ in 0..60 {
            for n in [1, 2, 3, 7, 11, 40] {
                let end = advance_business_days(start, n, &hol, &weekend).unwrap();
                assert!(end >= start);
                assert!(!weekend.contains(end.weekday()), "{start} + {n} = {end}");
                assert!(!hol.contains(&end), "{start} + {n} = {end}");
            }
            start = start.succ().unwrap();
        }
    }

    #[test]
    fn test_counts_match_weekday_total_without_holidays() {
        let weekend = WeekendDays::default();
        let start = date("2025-11-17");
        let end = advance_business_days(start, 20, &HolidaySet::new(), &weekend).unwrap();

        let mut counted = 0;
        let mut day = start;
        while day <= end {
            if !weekend.contains(day.weekday()) {
                counted += 1;
            }
            day = day.succ().unwrap();
        }
        assert_eq!(counted, 20);
    }

    #[test]
    fn test_degenerate_inputs_are_internal_errors() {
        let all_week = WeekendDays::new([
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]);
        assert!(matches!(
            advance_business_days(date("2025-11-17"), 1, &HolidaySet::new(), &all_week),
            Err(Error::Internal(_))
        ));
        assert!(matches!(
            advance_business_days(date("2025-11-17"), 0, &HolidaySet::new(), &WeekendDays::default()),
            Err(Error::Internal(_))
        ));
    }
}
