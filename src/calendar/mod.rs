//! Calendar primitives: date-only values, weekend definitions and holiday sets.

pub mod date;
pub mod holiday_set;
pub mod weekend;

pub use date::CalendarDate;
pub use holiday_set::HolidaySet;
pub use weekend::WeekendDays;

/// Whether `date` is neither a weekend day nor a holiday.
pub fn is_business_day(date: &CalendarDate, holidays: &HolidaySet, weekend: &WeekendDays) -> bool {
    !weekend.contains(date.weekday()) && !holidays.contains(date)
}
