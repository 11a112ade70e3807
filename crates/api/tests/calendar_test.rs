mod common;

use axum::http::StatusCode;
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use repairdesk_core::{
    config::{BusinessType, CalendarConfig},
    models::{
        calendar::{ServiceTypesResponse, SlotStatusResponse, SlotsResponse},
        timestamp::parse_timestamp,
    },
    schedule::{board::OccupantKind, CalendarBoard, DateRange, ViewMode},
};
use repairdesk_db::mock::MockCalendarSource;
use rstest::rstest;
use serde_json::Value;
use uuid::Uuid;

use common::{at, day, event, job, server_with};

#[tokio::test]
async fn test_slots_follow_business_hours() {
    let calendar = CalendarConfig {
        start_hour: 8,
        end_hour: 10,
        ..CalendarConfig::default()
    };
    let server = server_with(MockCalendarSource::new(), calendar);

    let response = server.get("/api/calendar/slots").await;
    response.assert_status_ok();

    let body: SlotsResponse = response.json();
    assert_eq!(body.slots, vec!["08:00", "08:30", "09:00", "09:30"]);
    assert_eq!((body.start_hour, body.end_hour), (8, 10));
}

#[tokio::test]
async fn test_service_types_follow_business_type() {
    let calendar = CalendarConfig {
        business_type: BusinessType::PhoneRepair,
        ..CalendarConfig::default()
    };
    let server = server_with(MockCalendarSource::new(), calendar);

    let body: ServiceTypesResponse = server.get("/api/calendar/service-types").await.json();
    assert_eq!(body.business_type, BusinessType::PhoneRepair);
    assert!(body.service_types.contains(&"Screen Replacement".to_string()));
}

#[test_log::test(tokio::test)]
async fn test_week_board_queries_visible_range() {
    let company_id = Uuid::new_v4();
    let jobs = vec![
        job(company_id, Some(at(2024, 3, 12, 0, 0)), "09:00"),
        job(company_id, Some(at(2024, 3, 12, 0, 0)), "9:00"),
    ];
    let events = vec![event(company_id, at(2024, 3, 12, 9, 0))];

    let mut source = MockCalendarSource::new();
    // Sunday 2024-03-10 through Saturday 2024-03-16.
    let returned_jobs = jobs.clone();
    source
        .expect_jobs_between()
        .with(eq(company_id), eq(DateRange::new(day(2024, 3, 10), day(2024, 3, 16))))
        .times(1)
        .returning(move |_, _| Ok(returned_jobs.clone()));
    let returned_events = events.clone();
    source
        .expect_events_between()
        .with(eq(company_id), eq(at(2024, 3, 10, 0, 0)), eq(at(2024, 3, 17, 0, 0)))
        .times(1)
        .returning(move |_, _, _| Ok(returned_events.clone()));

    let server = server_with(source, CalendarConfig::default());
    let response = server
        .get(&format!("/api/companies/{company_id}/calendar"))
        .add_query_param("view", "week")
        .add_query_param("date", "2024-03-12")
        .await;
    response.assert_status_ok();

    let board: CalendarBoard = response.json();
    assert_eq!(board.view, ViewMode::Week);
    assert_eq!(board.days.len(), 7);
    assert_eq!(board.booked_cells(), 1);

    let tuesday = &board.days[2];
    assert_eq!(tuesday.key, "2024-03-12");
    let nine = tuesday.cells.iter().find(|cell| cell.label == "09:00").unwrap();
    let kinds: Vec<OccupantKind> = nine.occupants.iter().map(|o| o.kind).collect();
    assert_eq!(
        kinds,
        vec![OccupantKind::Job, OccupantKind::Job, OccupantKind::Event]
    );
    assert_eq!(nine.occupants[0].id, jobs[0].id);
    assert_eq!(nine.occupants[1].id, jobs[1].id);
}

#[tokio::test]
async fn test_date_only_job_stays_on_its_day_west_of_utc() {
    let company_id = Uuid::new_v4();
    let mut on_the_12th = job(company_id, None, "09:00");
    on_the_12th.service_date = parse_timestamp("2024-03-12");
    let jobs = vec![on_the_12th];

    let mut source = MockCalendarSource::new();
    source
        .expect_jobs_between()
        .with(eq(company_id), eq(DateRange::new(day(2024, 3, 12), day(2024, 3, 12))))
        .returning(move |_, _| Ok(jobs.clone()));
    source
        .expect_events_between()
        .returning(|_, _, _| Ok(Vec::new()));

    let calendar = CalendarConfig {
        timezone: chrono_tz::America::New_York,
        ..CalendarConfig::default()
    };
    let server = server_with(source, calendar);

    let status: SlotStatusResponse = server
        .get(&format!("/api/companies/{company_id}/calendar/slot"))
        .add_query_param("date", "2024-03-12")
        .add_query_param("time", "09:00")
        .await
        .json();
    assert!(status.booked);
    assert_eq!(status.occupants.len(), 1);
}

#[tokio::test]
async fn test_month_board_has_no_cells() {
    let company_id = Uuid::new_v4();
    let mut source = MockCalendarSource::new();
    source
        .expect_jobs_between()
        .returning(|_, _| Ok(Vec::new()));
    source
        .expect_events_between()
        .returning(|_, _, _| Ok(Vec::new()));

    let server = server_with(source, CalendarConfig::default());
    let board: CalendarBoard = server
        .get(&format!("/api/companies/{company_id}/calendar"))
        .add_query_param("view", "month")
        .add_query_param("date", "2024-03-20")
        .await
        .json();

    assert_eq!(board.days.len(), 42);
    assert!(board.slots.is_empty());
}

#[rstest]
#[case("view", "year")]
#[case("date", "12/03/2024")]
#[tokio::test]
async fn test_calendar_rejects_bad_query(#[case] key: &str, #[case] value: &str) {
    let server = server_with(MockCalendarSource::new(), CalendarConfig::default());

    let response = server
        .get(&format!("/api/companies/{}/calendar", Uuid::new_v4()))
        .add_query_param(key, value)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().starts_with("Validation error"));
}

#[tokio::test]
async fn test_slot_status_reports_occupants() {
    let company_id = Uuid::new_v4();
    let jobs = vec![job(company_id, Some(at(2024, 3, 12, 0, 0)), "14:30")];

    let mut source = MockCalendarSource::new();
    source
        .expect_jobs_between()
        .with(eq(company_id), eq(DateRange::new(day(2024, 3, 12), day(2024, 3, 12))))
        .returning(move |_, _| Ok(jobs.clone()));
    source
        .expect_events_between()
        .returning(|_, _, _| Ok(Vec::new()));

    let server = server_with(source, CalendarConfig::default());
    let path = format!("/api/companies/{company_id}/calendar/slot");

    let taken: SlotStatusResponse = server
        .get(&path)
        .add_query_param("date", "2024-03-12")
        .add_query_param("time", "14:30")
        .await
        .json();
    assert!(taken.booked);
    assert_eq!(taken.label, "14:30");
    assert_eq!(taken.occupants.len(), 1);

    let free: SlotStatusResponse = server
        .get(&path)
        .add_query_param("date", "2024-03-12")
        .add_query_param("time", "15:00")
        .await
        .json();
    assert!(!free.booked);
    assert!(free.occupants.is_empty());
}

#[rstest]
#[case("9h00", "Invalid time of day")]
#[case("09:15", "Invalid slot")]
#[case("21:00", "outside the business hours")]
#[tokio::test]
async fn test_slot_status_rejects_unbookable_times(#[case] time: &str, #[case] message: &str) {
    let mut source = MockCalendarSource::new();
    source
        .expect_jobs_between()
        .returning(|_, _| Ok(Vec::new()));
    source
        .expect_events_between()
        .returning(|_, _, _| Ok(Vec::new()));
    let server = server_with(source, CalendarConfig::default());

    let response = server
        .get(&format!("/api/companies/{}/calendar/slot", Uuid::new_v4()))
        .add_query_param("date", "2024-03-12")
        .add_query_param("time", time)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains(message));
}

#[tokio::test]
async fn test_malformed_jobs_lists_undated_and_unplaceable() {
    let company_id = Uuid::new_v4();
    let undated = vec![job(company_id, None, "09:00")];
    let dated = vec![
        job(company_id, Some(at(2024, 3, 12, 0, 0)), "09:00"),
        job(company_id, Some(at(2024, 3, 12, 0, 0)), "noon"),
        job(company_id, Some(at(2024, 3, 13, 0, 0)), "10:45"),
    ];
    let expected = vec![undated[0].id, dated[1].id, dated[2].id];

    let mut source = MockCalendarSource::new();
    source
        .expect_undated_jobs()
        .with(eq(company_id))
        .returning(move |_| Ok(undated.clone()));
    source
        .expect_jobs_between()
        .returning(move |_, _| Ok(dated.clone()));

    let server = server_with(source, CalendarConfig::default());
    let body: Value = server
        .get(&format!("/api/companies/{company_id}/calendar/malformed"))
        .add_query_param("view", "week")
        .add_query_param("date", "2024-03-12")
        .await
        .json();

    let ids: Vec<Uuid> = body["jobs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["id"].as_str().unwrap().parse().unwrap())
        .collect();
    assert_eq!(ids, expected);
    assert_eq!(body["jobs"][0]["reason"], "missing service date");
    assert_eq!(body["range"]["start"], "2024-03-10");
}

#[tokio::test]
async fn test_storage_failure_is_internal_error() {
    let mut source = MockCalendarSource::new();
    source
        .expect_jobs_between()
        .returning(|_, _| Err(eyre::eyre!("connection refused")));
    source
        .expect_events_between()
        .returning(|_, _, _| Ok(Vec::new()));

    let server = server_with(source, CalendarConfig::default());
    let response = server
        .get(&format!("/api/companies/{}/calendar", Uuid::new_v4()))
        .add_query_param("date", "2024-03-12")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_health() {
    let server = server_with(MockCalendarSource::new(), CalendarConfig::default());

    let body: Value = server.get("/health").await.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["timezone"], "UTC");
}
