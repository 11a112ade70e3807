use chrono::{DateTime, NaiveDate, Utc};
use repairdesk_core::{
    errors::{CalendarError, CalendarResult},
    models::{CalendarEvent, Job, Timestamp},
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbJob {
    pub id: Uuid,
    pub company_id: Uuid,
    pub client_name: String,
    pub service_type: String,
    pub issue_description: String,
    pub service_date: Option<NaiveDate>,
    pub scheduled_time: String,
    pub priority: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbJob> for Job {
    type Error = CalendarError;

    fn try_from(row: DbJob) -> CalendarResult<Self> {
        Ok(Job {
            priority: row.priority.parse()?,
            status: row.status.parse()?,
            id: row.id,
            company_id: row.company_id,
            client_name: row.client_name,
            service_type: row.service_type,
            issue_description: row.issue_description,
            service_date: row
                .service_date
                .and_then(|day| day.and_hms_opt(0, 0, 0))
                .map(Timestamp::from),
            scheduled_time: row.scheduled_time,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCalendarEvent {
    pub id: Uuid,
    pub company_id: Uuid,
    pub start_time: Option<DateTime<Utc>>,
    pub client_name: String,
    pub service_type: String,
    pub created_at: DateTime<Utc>,
}

impl From<DbCalendarEvent> for CalendarEvent {
    fn from(row: DbCalendarEvent) -> Self {
        CalendarEvent {
            id: row.id,
            company_id: row.company_id,
            start: row.start_time.map(Timestamp::from),
            client_name: row.client_name,
            service_type: row.service_type,
        }
    }
}
