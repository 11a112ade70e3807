//! Time-of-day values used by the calendar.
//!
//! Jobs carry their start time as an `"H:MM"` / `"HH:MM"` string. That string is
//! normalized into a [`TimeOfDay`] (minutes since midnight) at the boundary, and
//! compared against grid [`Slot`]s, which only ever sit on `:00` or `:30`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalendarError, CalendarResult};

pub const SLOT_MINUTES: u8 = 30;

/// A wall-clock time within a day, stored as minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> CalendarResult<Self> {
        if hour >= 24 || minute >= 60 {
            return Err(CalendarError::InvalidTime(format!("{hour}:{minute:02}")));
        }
        Ok(Self(hour as u16 * 60 + minute as u16))
    }

    pub fn minutes_since_midnight(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    pub fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }

    /// True when the time lands exactly on `:00` or `:30`.
    pub fn is_on_grid(self) -> bool {
        self.minute() % SLOT_MINUTES == 0
    }

    pub fn to_slot(self) -> CalendarResult<Slot> {
        Slot::new(self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = CalendarError;

    /// Accepts `H:MM` or `HH:MM`. The minute part must be exactly two digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CalendarError::InvalidTime(s.to_string());
        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if hour.is_empty() || hour.len() > 2 || !all_digits(hour) {
            return Err(invalid());
        }
        if minute.len() != 2 || !all_digits(minute) {
            return Err(invalid());
        }

        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        let minute: u8 = minute.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// One bookable half-hour interval of a business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub hour: u8,
    pub minute: u8,
}

impl Slot {
    pub fn new(hour: u8, minute: u8) -> CalendarResult<Self> {
        if hour >= 24 || (minute != 0 && minute != SLOT_MINUTES) {
            return Err(CalendarError::InvalidSlot { hour, minute });
        }
        Ok(Self { hour, minute })
    }

    pub fn minutes_since_midnight(self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }

    /// Whether `time` falls exactly on this slot's start.
    pub fn matches(self, time: TimeOfDay) -> bool {
        time.minutes_since_midnight() == self.minutes_since_midnight()
    }
}

impl FromStr for Slot {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<TimeOfDay>()?.to_slot()
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}
