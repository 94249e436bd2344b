//! Weekend definition.

use chrono::Weekday;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;

/// Days of the week that are never business days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekendDays {
    // Keyed by days-from-Monday so the set has a stable order.
    days: BTreeSet<u32>,
}

impl WeekendDays {
    pub fn new(days: impl IntoIterator<Item = Weekday>) -> Self {
        Self {
            days: days
                .into_iter()
                .map(|d| d.num_days_from_monday())
                .collect(),
        }
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.days.contains(&day.num_days_from_monday())
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.days.iter().map(|&n| weekday_from_index(n))
    }
}

impl Default for WeekendDays {
    fn default() -> Self {
        Self::new([Weekday::Sat, Weekday::Sun])
    }
}

fn weekday_from_index(n: u32) -> Weekday {
    match n {
        0 => Weekday::Mon,
        1 => Weekday::Tue,
        2 => Weekday::Wed,
        3 => Weekday::Thu,
        4 => Weekday::Fri,
        5 => Weekday::Sat,
        _ => Weekday::Sun,
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

impl Serialize for WeekendDays {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(weekday_name))
    }
}

impl<'de> Deserialize<'de> for WeekendDays {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let names = Vec::<String>::deserialize(deserializer)?;
        let days = names
            .iter()
            .map(|name| {
                name.parse::<Weekday>()
                    .map_err(|_| serde::de::Error::custom(format!("unknown weekday: {name}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(days))
    }
}
