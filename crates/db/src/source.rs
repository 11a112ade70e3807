//! The fetch boundary between the calendar and storage.
//!
//! The HTTP layer asks a [`CalendarSource`] for the jobs and events of the
//! days it is about to render, then hands the snapshot to the pure core.
//! Jobs are stored against a calendar day and are fetched by local dates.
//! Events carry an instant and are fetched by UTC bounds.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::Result;
use repairdesk_core::models::{CalendarEvent, Job};
use repairdesk_core::schedule::DateRange;
use tracing::debug;
use uuid::Uuid;

use crate::{
    DbPool,
    repositories::{event, job},
};

#[async_trait]
pub trait CalendarSource: Send + Sync {
    /// Jobs whose service day falls within `days`, both ends included.
    async fn jobs_between(&self, company_id: Uuid, days: DateRange) -> Result<Vec<Job>>;

    /// Events starting in `[from, to)`.
    async fn events_between(
        &self,
        company_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>>;

    /// Jobs the calendar can never place because they have no service date.
    async fn undated_jobs(&self, company_id: Uuid) -> Result<Vec<Job>>;
}

pub struct PgCalendarSource {
    pool: DbPool,
}

impl PgCalendarSource {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CalendarSource for PgCalendarSource {
    async fn jobs_between(&self, company_id: Uuid, days: DateRange) -> Result<Vec<Job>> {
        let jobs = job::get_jobs_in_range(&self.pool, company_id, days).await?;
        debug!(%company_id, start = %days.start, end = %days.end, count = jobs.len(), "Loaded jobs");
        Ok(jobs)
    }

    async fn events_between(
        &self,
        company_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>> {
        let events = event::get_events_in_range(&self.pool, company_id, from, to).await?;
        debug!(%company_id, %from, %to, count = events.len(), "Loaded calendar events");
        Ok(events)
    }

    async fn undated_jobs(&self, company_id: Uuid) -> Result<Vec<Job>> {
        job::get_undated_jobs(&self.pool, company_id).await
    }
}
