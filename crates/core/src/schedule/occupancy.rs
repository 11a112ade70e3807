//! # Slot Occupancy
//!
//! Answers "what sits in this slot on this day" from already bucketed jobs and
//! events. A slot is booked when the answer is non-empty; booking is never
//! stored.
//!
//! Matching is exact: a job occupies a slot only when its `scheduled_time`
//! parses to the slot's hour and minute, an event only when its local start time
//! does. A job with a malformed `scheduled_time` never matches anything. Use
//! [`malformed_jobs`] to find those.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;
use tracing::trace;
use uuid::Uuid;

use crate::errors::{CalendarError, CalendarResult};
use crate::models::{CalendarEvent, Job, Slot};
use crate::schedule::bucket::{DayBuckets, day_key};
use crate::schedule::grid::SlotGrid;

/// Decides whether a bucketed entry starts in a given slot.
pub trait SlotMatch {
    fn occupies(&self, local: NaiveDateTime, slot: Slot) -> bool;
}

impl SlotMatch for Job {
    fn occupies(&self, _local: NaiveDateTime, slot: Slot) -> bool {
        match self.time_of_day() {
            Ok(time) => slot.matches(time),
            Err(err) => {
                trace!(job_id = %self.id, %err, "Job cannot be placed in any slot");
                false
            }
        }
    }
}

impl SlotMatch for CalendarEvent {
    fn occupies(&self, local: NaiveDateTime, slot: Slot) -> bool {
        local.hour() == slot.hour as u32 && local.minute() == slot.minute as u32
    }
}

/// Entries of `day` that occupy `slot`, in bucket order.
pub fn occupants_of<'a, T: SlotMatch>(
    day: NaiveDate,
    slot: Slot,
    buckets: &DayBuckets<'a, T>,
) -> Vec<&'a T> {
    buckets
        .get(day)
        .iter()
        .filter(|entry| entry.item.occupies(entry.local, slot))
        .map(|entry| entry.item)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Occupant<'a> {
    Job(&'a Job),
    Event(&'a CalendarEvent),
}

impl Occupant<'_> {
    pub fn id(&self) -> Uuid {
        match self {
            Occupant::Job(job) => job.id,
            Occupant::Event(event) => event.id,
        }
    }
}

/// The jobs and events found in one slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Occupancy<'a> {
    jobs: Vec<&'a Job>,
    events: Vec<&'a CalendarEvent>,
}

impl<'a> Occupancy<'a> {
    pub fn jobs(&self) -> &[&'a Job] {
        &self.jobs
    }

    pub fn events(&self) -> &[&'a CalendarEvent] {
        &self.events
    }

    /// Jobs first, then events.
    pub fn occupants(&self) -> Vec<Occupant<'a>> {
        self.jobs
            .iter()
            .copied()
            .map(Occupant::Job)
            .chain(self.events.iter().copied().map(Occupant::Event))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.jobs.len() + self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_booked(&self) -> bool {
        !self.is_empty()
    }
}

pub fn resolve_occupancy<'a>(
    day: NaiveDate,
    slot: Slot,
    jobs: &DayBuckets<'a, Job>,
    events: &DayBuckets<'a, CalendarEvent>,
) -> Occupancy<'a> {
    Occupancy {
        jobs: occupants_of(day, slot, jobs),
        events: occupants_of(day, slot, events),
    }
}

/// Refuses a new booking in a slot that is off the grid or already taken.
pub fn check_bookable(
    day: NaiveDate,
    slot: Slot,
    grid: &SlotGrid,
    jobs: &DayBuckets<'_, Job>,
    events: &DayBuckets<'_, CalendarEvent>,
) -> CalendarResult<()> {
    if !grid.contains(slot) {
        return Err(CalendarError::SlotOutsideGrid {
            slot: slot.to_string(),
            start: grid.start_hour,
            end: grid.end_hour,
        });
    }

    let occupancy = resolve_occupancy(day, slot, jobs, events);
    if occupancy.is_booked() {
        return Err(CalendarError::SlotTaken {
            date: day_key(day),
            slot: slot.to_string(),
            count: occupancy.len(),
        });
    }

    Ok(())
}

/// A job the calendar cannot place in any slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MalformedJob {
    pub id: Uuid,
    pub scheduled_time: String,
    pub reason: String,
}

/// Jobs whose `scheduled_time` is unreadable or not on a half-hour boundary.
pub fn malformed_jobs<'a, I>(jobs: I) -> Vec<MalformedJob>
where
    I: IntoIterator<Item = &'a Job>,
{
    jobs.into_iter()
        .filter_map(|job| {
            let reason = match job.time_of_day() {
                Err(err) => err.to_string(),
                Ok(time) if !time.is_on_grid() => format!("{time} is not on a half-hour boundary"),
                Ok(_) => return None,
            };
            Some(MalformedJob {
                id: job.id,
                scheduled_time: job.scheduled_time.clone(),
                reason,
            })
        })
        .collect()
}
