//! # Calendar Views
//!
//! The host picks a [`ViewMode`] explicitly. This module turns that choice and
//! an anchor date into the range of days the view renders, and handles
//! previous / next navigation.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::errors::CalendarError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Month,
    #[default]
    Week,
    Day,
}

impl ViewMode {
    /// Whether the view renders one row per grid slot.
    pub fn shows_slots(self) -> bool {
        !matches!(self, ViewMode::Month)
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ViewMode::Month => "month",
            ViewMode::Week => "week",
            ViewMode::Day => "day",
        })
    }
}

impl FromStr for ViewMode {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "month" => Ok(ViewMode::Month),
            "week" => Ok(ViewMode::Week),
            "day" => Ok(ViewMode::Day),
            other => Err(CalendarError::Validation(format!("Unknown view: {other}"))),
        }
    }
}

/// An inclusive span of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDateRange")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Wire form of [`DateRange`]; deserialization goes through [`DateRange::new`].
#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl From<RawDateRange> for DateRange {
    fn from(raw: RawDateRange) -> Self {
        DateRange::new(raw.start, raw.end)
    }
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    /// Number of days in the range. Zero when `end` precedes `start`.
    pub fn len(&self) -> usize {
        ((self.end - self.start).num_days().max(-1) + 1) as usize
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Half-open UTC instants `[from, to)` covering every local day of the range.
    pub fn utc_bounds(&self, tz: Tz) -> (DateTime<Utc>, DateTime<Utc>) {
        let from = local_midnight(self.start, tz);
        let to = local_midnight(self.end.succ_opt().unwrap_or(self.end), tz);
        (from, to)
    }
}

/// First instant of `day` in `tz`, stepping forward over DST gaps.
fn local_midnight(day: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let midnight = day.and_time(chrono::NaiveTime::MIN);
    (0..=3)
        .find_map(|hour| {
            tz.from_local_datetime(&(midnight + chrono::Duration::hours(hour)))
                .earliest()
        })
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

pub fn start_of_week(day: NaiveDate, week_start: Weekday) -> NaiveDate {
    let offset =
        (7 + day.weekday().num_days_from_monday() - week_start.num_days_from_monday()) % 7;
    day - Days::new(offset as u64)
}

pub fn visible_range(view: ViewMode, anchor: NaiveDate, week_start: Weekday) -> DateRange {
    match view {
        ViewMode::Day => DateRange::new(anchor, anchor),
        ViewMode::Week => {
            let start = start_of_week(anchor, week_start);
            DateRange::new(start, start + Days::new(6))
        }
        ViewMode::Month => {
            let first = anchor.with_day(1).unwrap_or(anchor);
            let last = (first + Months::new(1)).pred_opt().unwrap_or(first);
            let start = start_of_week(first, week_start);
            let end = start_of_week(last, week_start) + Days::new(6);
            DateRange::new(start, end)
        }
    }
}

/// Moves the anchor by `steps` views; negative steps go back.
pub fn shift(view: ViewMode, anchor: NaiveDate, steps: i32) -> NaiveDate {
    let magnitude = steps.unsigned_abs();
    let shifted = match view {
        ViewMode::Day => shift_days(anchor, steps.is_negative(), magnitude as u64),
        ViewMode::Week => shift_days(anchor, steps.is_negative(), magnitude as u64 * 7),
        ViewMode::Month if steps.is_negative() => {
            anchor.checked_sub_months(Months::new(magnitude))
        }
        ViewMode::Month => anchor.checked_add_months(Months::new(magnitude)),
    };
    shifted.unwrap_or(anchor)
}

fn shift_days(anchor: NaiveDate, back: bool, days: u64) -> Option<NaiveDate> {
    if back {
        anchor.checked_sub_days(Days::new(days))
    } else {
        anchor.checked_add_days(Days::new(days))
    }
}
