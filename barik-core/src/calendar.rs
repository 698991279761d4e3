//! Calendar keys used to bucket transactions: days, months, day parts, weekdays.
//!
//! All keys are taken from the statement's local wall-clock time; no
//! timezone conversion happens anywhere.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar year-month. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    /// 1-based month
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    /// 0-based month, for indexing month-name tables
    pub fn index0(&self) -> usize {
        self.month.saturating_sub(1) as usize % 12
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Coarse time-of-day bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPart {
    /// 06:00 to 13:59
    Morning,
    /// 14:00 to 21:59
    Afternoon,
    /// 22:00 to 05:59
    Night,
}

impl DayPart {
    pub const ALL: [DayPart; 3] = [DayPart::Morning, DayPart::Afternoon, DayPart::Night];

    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..14 => DayPart::Morning,
            14..22 => DayPart::Afternoon,
            _ => DayPart::Night,
        }
    }

    pub fn of(ts: NaiveDateTime) -> Self {
        Self::from_hour(ts.hour())
    }

    pub fn index(&self) -> usize {
        match self {
            DayPart::Morning => 0,
            DayPart::Afternoon => 1,
            DayPart::Night => 2,
        }
    }
}

/// Weekday bucket index, 0 = Sunday.
pub fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_sunday() as usize
}

/// Short day label as printed in rankings: `d/m/yyyy`, no zero padding.
pub fn day_label(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}
