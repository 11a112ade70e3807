//! # Calendar Handlers
//!
//! Read-only endpoints a month / week / day renderer binds to. Each request
//! works the same way:
//!
//! 1. Resolve the visible days from the requested view and anchor date
//! 2. Load the jobs and events of those days from the [`CalendarSource`]
//! 3. Hand the snapshot to the pure scheduling core and return its answer
//!
//! [`CalendarSource`]: repairdesk_db::CalendarSource

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use repairdesk_core::{
    errors::CalendarError,
    models::{
        calendar::{MalformedJobsResponse, ServiceTypesResponse, SlotStatusResponse, SlotsResponse},
        CalendarEvent, Job, Slot, TimeOfDay,
    },
    schedule::{
        board::OccupantSummary,
        bucket::parse_day_key,
        bucket_by_day, check_bookable,
        occupancy::{malformed_jobs, MalformedJob},
        resolve_occupancy, CalendarBoard, DateRange, ViewMode, visible_range,
    },
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

/// Query parameters selecting what a calendar view shows
///
/// * `view` - `month`, `week` or `day` (default: `week`)
/// * `date` - anchor day as `YYYY-MM-DD` (default: today in the calendar timezone)
#[derive(Debug, Default, Deserialize)]
pub struct CalendarQuery {
    pub view: Option<String>,
    pub date: Option<String>,
}

/// Query parameters for a single slot lookup
#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    /// Day as `YYYY-MM-DD`
    pub date: String,
    /// Slot start as `H:MM` or `HH:MM`
    pub time: String,
}

/// Lists the bookable slots of a business day
///
/// ```text
/// GET /api/calendar/slots
/// ```
pub async fn get_slots(State(state): State<Arc<ApiState>>) -> Json<SlotsResponse> {
    let grid = state.calendar.grid();
    Json(SlotsResponse {
        start_hour: grid.start_hour,
        end_hour: grid.end_hour,
        slots: grid.labels(),
    })
}

/// Lists the service vocabulary of the configured business type
///
/// ```text
/// GET /api/calendar/service-types
/// ```
pub async fn get_service_types(State(state): State<Arc<ApiState>>) -> Json<ServiceTypesResponse> {
    let business_type = state.calendar.business_type;
    Json(ServiceTypesResponse {
        business_type,
        service_types: business_type
            .service_types()
            .iter()
            .map(|name| name.to_string())
            .collect(),
    })
}

/// Builds the board for a company's month, week or day view
///
/// ```text
/// GET /api/companies/:company_id/calendar?view=week&date=2024-03-12
/// ```
///
/// # Errors
///
/// * `CalendarError::Validation` - Unknown view or unreadable date
/// * `CalendarError::Database` - Loading jobs or events failed
#[instrument(skip(state))]
pub async fn get_calendar(
    State(state): State<Arc<ApiState>>,
    Path(company_id): Path<Uuid>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarBoard>, AppError> {
    let view = parse_view(query.view.as_deref())?;
    let anchor = parse_anchor(&state, query.date.as_deref())?;
    let range = visible_range(view, anchor, state.calendar.week_starts_on);

    let (jobs, events) = load_range(&state, company_id, range).await?;
    let board = CalendarBoard::build(&state.calendar, view, anchor, &jobs, &events);
    debug!(
        days = board.days.len(),
        booked = board.booked_cells(),
        "Built calendar board"
    );

    Ok(Json(board))
}

/// Reports who occupies one slot of one day
///
/// ```text
/// GET /api/companies/:company_id/calendar/slot?date=2024-03-12&time=09:00
/// ```
///
/// # Errors
///
/// * `CalendarError::Validation` - Unreadable date
/// * `CalendarError::InvalidTime` - Unreadable time
/// * `CalendarError::InvalidSlot` - Time not on a half-hour boundary
/// * `CalendarError::SlotOutsideGrid` - Slot outside business hours
/// * `CalendarError::Database` - Loading jobs or events failed
#[instrument(skip(state))]
pub async fn get_slot_status(
    State(state): State<Arc<ApiState>>,
    Path(company_id): Path<Uuid>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<SlotStatusResponse>, AppError> {
    let date = parse_date(&query.date)?;
    let slot: Slot = query.time.parse::<TimeOfDay>()?.to_slot()?;

    let (jobs, events) = load_range(&state, company_id, DateRange::new(date, date)).await?;
    let job_buckets = bucket_by_day(&jobs, state.calendar.timezone);
    let event_buckets = bucket_by_day(&events, state.calendar.timezone);

    let grid = state.calendar.grid();
    let booked = match check_bookable(date, slot, &grid, &job_buckets, &event_buckets) {
        Ok(()) => false,
        Err(CalendarError::SlotTaken { .. }) => true,
        Err(err) => return Err(err.into()),
    };

    let occupants = resolve_occupancy(date, slot, &job_buckets, &event_buckets)
        .occupants()
        .into_iter()
        .map(OccupantSummary::from)
        .collect();

    Ok(Json(SlotStatusResponse {
        date,
        slot,
        label: slot.to_string(),
        booked,
        occupants,
    }))
}

/// Lists the jobs the calendar cannot place in the visible range
///
/// Covers jobs without a service date as well as jobs whose scheduled time is
/// unreadable or off the half-hour grid.
///
/// ```text
/// GET /api/companies/:company_id/calendar/malformed?view=month&date=2024-03-01
/// ```
#[instrument(skip(state))]
pub async fn get_malformed_jobs(
    State(state): State<Arc<ApiState>>,
    Path(company_id): Path<Uuid>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<MalformedJobsResponse>, AppError> {
    let view = parse_view(query.view.as_deref())?;
    let anchor = parse_anchor(&state, query.date.as_deref())?;
    let range = visible_range(view, anchor, state.calendar.week_starts_on);
    let (dated, undated) = tokio::try_join!(
        state.source.jobs_between(company_id, range),
        state.source.undated_jobs(company_id),
    )?;

    let mut jobs: Vec<MalformedJob> = undated
        .iter()
        .map(|job| MalformedJob {
            id: job.id,
            scheduled_time: job.scheduled_time.clone(),
            reason: "missing service date".to_string(),
        })
        .collect();
    jobs.extend(malformed_jobs(&dated));

    Ok(Json(MalformedJobsResponse { range, jobs }))
}

async fn load_range(
    state: &ApiState,
    company_id: Uuid,
    range: DateRange,
) -> Result<(Vec<Job>, Vec<CalendarEvent>), AppError> {
    let (from, to) = range.utc_bounds(state.calendar.timezone);
    let (jobs, events) = tokio::try_join!(
        state.source.jobs_between(company_id, range),
        state.source.events_between(company_id, from, to),
    )?;
    Ok((jobs, events))
}

fn parse_view(view: Option<&str>) -> Result<ViewMode, CalendarError> {
    view.map(str::parse::<ViewMode>).transpose().map(Option::unwrap_or_default)
}

fn parse_date(value: &str) -> Result<NaiveDate, CalendarError> {
    parse_day_key(value.trim()).ok_or_else(|| {
        CalendarError::Validation(format!("Invalid date {value:?}. Expected YYYY-MM-DD"))
    })
}

fn parse_anchor(state: &ApiState, date: Option<&str>) -> Result<NaiveDate, CalendarError> {
    match date {
        Some(value) => parse_date(value),
        None => Ok(Utc::now().with_timezone(&state.calendar.timezone).date_naive()),
    }
}
