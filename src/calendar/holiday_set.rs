//! Sets of holiday dates.

use super::CalendarDate;
use std::collections::BTreeSet;

/// Holiday dates, possibly spanning several years.
///
/// A year that was never loaded simply has no members, which reads the same
/// as a year without holidays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidaySet {
    dates: BTreeSet<CalendarDate>,
}

impl HolidaySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        self.dates.contains(date)
    }

    pub fn insert(&mut self, date: CalendarDate) -> bool {
        self.dates.insert(date)
    }

    /// Add every date of `other` to this set.
    pub fn merge(&mut self, other: &HolidaySet) {
        self.dates.extend(other.dates.iter().copied());
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Members falling in `year`.
    pub fn for_year(&self, year: i32) -> HolidaySet {
        self.dates
            .iter()
            .filter(|d| d.year() == year)
            .copied()
            .collect()
    }
}

impl FromIterator<CalendarDate> for HolidaySet {
    fn from_iter<I: IntoIterator<Item = CalendarDate>>(iter: I) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

impl Extend<CalendarDate> for HolidaySet {
    fn extend<I: IntoIterator<Item = CalendarDate>>(&mut self, iter: I) {
        self.dates.extend(iter);
    }
}
