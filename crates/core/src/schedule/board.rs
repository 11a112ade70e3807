//! # Calendar Board
//!
//! The read-only value a month / week / day renderer draws from. Building a
//! board buckets both collections once, walks the visible days and resolves
//! every grid slot of every day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::CalendarConfig;
use crate::models::{CalendarEvent, Job, Priority, Slot};
use crate::schedule::bucket::{bucket_report, day_key};
use crate::schedule::occupancy::{Occupant, resolve_occupancy};
use crate::schedule::view::{DateRange, ViewMode, visible_range};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OccupantKind {
    Job,
    Event,
}

/// What a renderer needs to draw one entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupantSummary {
    pub kind: OccupantKind,
    pub id: Uuid,
    pub client_name: String,
    pub service_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl From<Occupant<'_>> for OccupantSummary {
    fn from(occupant: Occupant<'_>) -> Self {
        match occupant {
            Occupant::Job(job) => Self {
                kind: OccupantKind::Job,
                id: job.id,
                client_name: job.client_name.clone(),
                service_type: job.service_type.clone(),
                priority: Some(job.priority),
            },
            Occupant::Event(event) => Self {
                kind: OccupantKind::Event,
                id: event.id,
                client_name: event.client_name.clone(),
                service_type: event.service_type.clone(),
                priority: None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardCell {
    pub slot: Slot,
    pub label: String,
    pub booked: bool,
    pub occupants: Vec<OccupantSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardDay {
    pub date: NaiveDate,
    pub key: String,
    /// Every entry of the day, jobs first.
    pub entries: Vec<OccupantSummary>,
    /// One cell per grid slot; empty in month view.
    pub cells: Vec<BoardCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarBoard {
    pub view: ViewMode,
    pub anchor: NaiveDate,
    pub range: DateRange,
    pub timezone: String,
    pub slots: Vec<String>,
    pub days: Vec<BoardDay>,
    /// Entries left off the board because they have no usable date.
    pub excluded: Vec<Uuid>,
}

impl CalendarBoard {
    pub fn build(
        config: &CalendarConfig,
        view: ViewMode,
        anchor: NaiveDate,
        jobs: &[Job],
        events: &[CalendarEvent],
    ) -> Self {
        let range = visible_range(view, anchor, config.week_starts_on);
        let grid = config.grid();
        let slots = if view.shows_slots() {
            grid.slots()
        } else {
            Vec::new()
        };

        let job_report = bucket_report(jobs, config.timezone);
        let event_report = bucket_report(events, config.timezone);
        let job_buckets = job_report.buckets;
        let event_buckets = event_report.buckets;

        let days = range
            .days()
            .map(|date| {
                let entries = job_buckets
                    .items(date)
                    .map(Occupant::Job)
                    .chain(event_buckets.items(date).map(Occupant::Event))
                    .map(OccupantSummary::from)
                    .collect();

                let cells = slots
                    .iter()
                    .map(|&slot| {
                        let occupancy = resolve_occupancy(date, slot, &job_buckets, &event_buckets);
                        BoardCell {
                            slot,
                            label: slot.to_string(),
                            booked: occupancy.is_booked(),
                            occupants: occupancy
                                .occupants()
                                .into_iter()
                                .map(OccupantSummary::from)
                                .collect(),
                        }
                    })
                    .collect();

                BoardDay {
                    date,
                    key: day_key(date),
                    entries,
                    cells,
                }
            })
            .collect();

        let mut excluded = job_report.excluded;
        excluded.extend(event_report.excluded);

        Self {
            view,
            anchor,
            range,
            timezone: config.timezone.name().to_string(),
            slots: slots.iter().map(Slot::to_string).collect(),
            days,
            excluded,
        }
    }

    pub fn day(&self, date: NaiveDate) -> Option<&BoardDay> {
        self.days.iter().find(|day| day.date == date)
    }

    /// Number of booked cells across the board.
    pub fn booked_cells(&self) -> usize {
        self.days
            .iter()
            .flat_map(|day| &day.cells)
            .filter(|cell| cell.booked)
            .count()
    }
}
