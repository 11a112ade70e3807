use std::sync::Arc;

use axum_test::TestServer;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use repairdesk_api::{router, ApiState};
use repairdesk_core::{
    config::CalendarConfig,
    models::{CalendarEvent, Job, JobStatus, Priority},
};
use repairdesk_db::mock::MockCalendarSource;
use uuid::Uuid;

pub fn server_with(source: MockCalendarSource, calendar: CalendarConfig) -> TestServer {
    let state = Arc::new(ApiState {
        source: Arc::new(source),
        calendar,
    });
    TestServer::new(router(state)).expect("Failed to start test server")
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn job(company_id: Uuid, service_date: Option<DateTime<Utc>>, scheduled_time: &str) -> Job {
    Job {
        id: Uuid::new_v4(),
        company_id,
        client_name: "Margaret Hamilton".to_string(),
        service_type: "Refrigerator".to_string(),
        issue_description: "Not cooling".to_string(),
        service_date: service_date.map(Into::into),
        scheduled_time: scheduled_time.to_string(),
        priority: Priority::High,
        status: JobStatus::Diagnosing,
    }
}

pub fn event(company_id: Uuid, start: DateTime<Utc>) -> CalendarEvent {
    CalendarEvent {
        id: Uuid::new_v4(),
        company_id,
        start: Some(start.into()),
        client_name: "Imported".to_string(),
        service_type: "Site Visit".to_string(),
    }
}
