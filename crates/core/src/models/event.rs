use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::timestamp::{self, Timestamp};

/// An externally sourced calendar entry. Unlike [`Job`](super::job::Job), the day and
/// time live in a single `start` timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: Uuid,
    pub company_id: Uuid,
    #[serde(default, with = "timestamp::lenient")]
    pub start: Option<Timestamp>,
    pub client_name: String,
    pub service_type: String,
}
