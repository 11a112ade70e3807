use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::mock;
use repairdesk_core::models::{CalendarEvent, Job};
use repairdesk_core::schedule::DateRange;
use uuid::Uuid;

use crate::source::CalendarSource;

// Mock calendar source for testing
mock! {
    pub CalendarSource {}

    #[async_trait]
    impl CalendarSource for CalendarSource {
        async fn jobs_between(&self, company_id: Uuid, days: DateRange) -> eyre::Result<Vec<Job>>;

        async fn events_between(
            &self,
            company_id: Uuid,
            from: DateTime<Utc>,
            to: DateTime<Utc>,
        ) -> eyre::Result<Vec<CalendarEvent>>;

        async fn undated_jobs(&self, company_id: Uuid) -> eyre::Result<Vec<Job>>;
    }
}
