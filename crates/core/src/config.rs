//! # Calendar Configuration
//!
//! Everything the scheduling core needs to know about the tenant is passed in
//! through [`CalendarConfig`]: business hours, the display timezone used to
//! decide which calendar day a timestamp belongs to, the first day of the week
//! and the business type that selects the service vocabulary.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::errors::{CalendarError, CalendarResult};
use crate::schedule::grid::SlotGrid;

pub const DEFAULT_START_HOUR: u8 = 7;
pub const DEFAULT_END_HOUR: u8 = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// First bookable hour (inclusive)
    pub start_hour: u8,

    /// Closing hour (exclusive)
    pub end_hour: u8,

    /// Timezone in which calendar days and slot times are read
    pub timezone: Tz,

    /// First column of week and month views
    pub week_starts_on: Weekday,

    pub business_type: BusinessType,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            start_hour: DEFAULT_START_HOUR,
            end_hour: DEFAULT_END_HOUR,
            timezone: Tz::UTC,
            week_starts_on: Weekday::Sun,
            business_type: BusinessType::General,
        }
    }
}

impl CalendarConfig {
    pub fn validate(&self) -> CalendarResult<()> {
        if self.end_hour > 24 {
            return Err(CalendarError::Validation(format!(
                "end hour {} is past midnight",
                self.end_hour
            )));
        }
        if self.start_hour >= self.end_hour {
            return Err(CalendarError::Validation(format!(
                "start hour {} must be before end hour {}",
                self.start_hour, self.end_hour
            )));
        }
        Ok(())
    }

    pub fn grid(&self) -> SlotGrid {
        SlotGrid::new(self.start_hour, self.end_hour)
    }
}

/// Tenant category. Only changes which service vocabulary the UI offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BusinessType {
    Electrician,
    Plumber,
    ApplianceRepair,
    PhoneRepair,
    ComputerRepair,
    Hvac,
    #[default]
    General,
}

impl BusinessType {
    pub fn service_types(self) -> &'static [&'static str] {
        match self {
            BusinessType::Electrician => &[
                "Wiring",
                "Panel Upgrade",
                "Lighting",
                "Outlet Repair",
                "Inspection",
            ],
            BusinessType::Plumber => &[
                "Leak Repair",
                "Drain Cleaning",
                "Water Heater",
                "Pipe Replacement",
                "Inspection",
            ],
            BusinessType::ApplianceRepair => &[
                "Washing Machine",
                "Refrigerator",
                "Dishwasher",
                "Oven",
                "Dryer",
            ],
            BusinessType::PhoneRepair => &[
                "Screen Replacement",
                "Battery Replacement",
                "Charging Port",
                "Water Damage",
                "Software",
            ],
            BusinessType::ComputerRepair => &[
                "Hardware Diagnosis",
                "Data Recovery",
                "Virus Removal",
                "Upgrade",
                "Software",
            ],
            BusinessType::Hvac => &[
                "Installation",
                "Maintenance",
                "Refrigerant Recharge",
                "Thermostat",
                "Duct Cleaning",
            ],
            BusinessType::General => &["Repair", "Maintenance", "Installation", "Inspection"],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BusinessType::Electrician => "Electrician",
            BusinessType::Plumber => "Plumber",
            BusinessType::ApplianceRepair => "ApplianceRepair",
            BusinessType::PhoneRepair => "PhoneRepair",
            BusinessType::ComputerRepair => "ComputerRepair",
            BusinessType::Hvac => "Hvac",
            BusinessType::General => "General",
        }
    }
}

impl fmt::Display for BusinessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BusinessType {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "electrician" => Ok(BusinessType::Electrician),
            "plumber" => Ok(BusinessType::Plumber),
            "appliancerepair" => Ok(BusinessType::ApplianceRepair),
            "phonerepair" => Ok(BusinessType::PhoneRepair),
            "computerrepair" => Ok(BusinessType::ComputerRepair),
            "hvac" => Ok(BusinessType::Hvac),
            "general" => Ok(BusinessType::General),
            _ => Err(CalendarError::Validation(format!("Unknown business type: {s}"))),
        }
    }
}
