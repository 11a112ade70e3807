use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CalendarError, CalendarResult};
use crate::models::time::TimeOfDay;
use crate::models::timestamp::{self, Timestamp};

/// A scheduled repair job as delivered by the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub company_id: Uuid,
    pub client_name: String,
    pub service_type: String,
    #[serde(default)]
    pub issue_description: String,
    #[serde(default, with = "timestamp::lenient")]
    pub service_date: Option<Timestamp>,
    #[serde(default)]
    pub scheduled_time: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: JobStatus,
}

impl Job {
    /// Normalized start time, or a typed error when `scheduled_time` is malformed.
    pub fn time_of_day(&self) -> CalendarResult<TimeOfDay> {
        self.scheduled_time.parse()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Priority::Low),
            "Medium" => Ok(Priority::Medium),
            "High" => Ok(Priority::High),
            "Urgent" => Ok(Priority::Urgent),
            other => Err(CalendarError::Validation(format!(
                "Unknown priority: {other}"
            ))),
        }
    }
}

/// Repair lifecycle. Carried for display only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    #[default]
    Received,
    Diagnosing,
    #[serde(rename = "Waiting for Parts")]
    WaitingForParts,
    #[serde(rename = "In Repair")]
    InRepair,
    Completed,
    Delivered,
    Cancelled,
}

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Received => "Received",
            JobStatus::Diagnosing => "Diagnosing",
            JobStatus::WaitingForParts => "Waiting for Parts",
            JobStatus::InRepair => "In Repair",
            JobStatus::Completed => "Completed",
            JobStatus::Delivered => "Delivered",
            JobStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Received" => Ok(JobStatus::Received),
            "Diagnosing" => Ok(JobStatus::Diagnosing),
            "Waiting for Parts" => Ok(JobStatus::WaitingForParts),
            "In Repair" => Ok(JobStatus::InRepair),
            "Completed" => Ok(JobStatus::Completed),
            "Delivered" => Ok(JobStatus::Delivered),
            "Cancelled" => Ok(JobStatus::Cancelled),
            other => Err(CalendarError::Validation(format!("Unknown status: {other}"))),
        }
    }
}
