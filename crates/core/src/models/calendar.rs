use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::BusinessType;
use crate::schedule::board::OccupantSummary;
use crate::schedule::occupancy::MalformedJob;
use crate::schedule::view::DateRange;

use super::time::Slot;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotsResponse {
    pub start_hour: u8,
    pub end_hour: u8,
    pub slots: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceTypesResponse {
    pub business_type: BusinessType,
    pub service_types: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotStatusResponse {
    pub date: NaiveDate,
    pub slot: Slot,
    pub label: String,
    pub booked: bool,
    pub occupants: Vec<OccupantSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MalformedJobsResponse {
    pub range: DateRange,
    pub jobs: Vec<MalformedJob>,
}
