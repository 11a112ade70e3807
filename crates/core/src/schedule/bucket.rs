//! # Date Bucketing
//!
//! Groups a flat, unordered collection of jobs or events into per-day buckets
//! keyed by the local calendar date in the display timezone. Within a day,
//! entries keep their original relative order.
//!
//! Entries without a usable date are left out of the buckets.
//! [`bucket_report`] returns their ids alongside the buckets so a caller can
//! surface them instead of losing them silently.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use tracing::debug;
use uuid::Uuid;

use crate::models::{CalendarEvent, Job, Timestamp};

/// Anything that can be placed on the calendar.
pub trait Scheduled {
    fn id(&self) -> Uuid;

    /// The timestamp used to decide which day the entry belongs to.
    fn scheduled_at(&self) -> Option<Timestamp>;
}

impl Scheduled for Job {
    fn id(&self) -> Uuid {
        self.id
    }

    fn scheduled_at(&self) -> Option<Timestamp> {
        self.service_date
    }
}

impl Scheduled for CalendarEvent {
    fn id(&self) -> Uuid {
        self.id
    }

    fn scheduled_at(&self) -> Option<Timestamp> {
        self.start
    }
}

/// Formats a calendar day as `YYYY-MM-DD`.
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_day_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()
}

/// An entry together with its local date and time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucketed<'a, T> {
    pub local: NaiveDateTime,
    pub item: &'a T,
}

/// Day → entries on that day, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct DayBuckets<'a, T> {
    days: BTreeMap<NaiveDate, Vec<Bucketed<'a, T>>>,
}

impl<'a, T> Default for DayBuckets<'a, T> {
    fn default() -> Self {
        Self {
            days: BTreeMap::new(),
        }
    }
}

impl<'a, T> DayBuckets<'a, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, date: NaiveDate) -> &[Bucketed<'a, T>] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get_key(&self, key: &str) -> &[Bucketed<'a, T>] {
        parse_day_key(key).map(|date| self.get(date)).unwrap_or(&[])
    }

    /// Entries of a day without the bucketing metadata.
    pub fn items(&self, date: NaiveDate) -> impl Iterator<Item = &'a T> + '_ {
        self.get(date).iter().map(|entry| entry.item)
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    /// Number of days that have at least one entry.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Total number of bucketed entries.
    pub fn entry_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    fn push(&mut self, local: NaiveDateTime, item: &'a T) {
        self.days
            .entry(local.date())
            .or_default()
            .push(Bucketed { local, item });
    }
}

/// Buckets plus the ids of entries that could not be placed.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketReport<'a, T> {
    pub buckets: DayBuckets<'a, T>,
    pub excluded: Vec<Uuid>,
}

pub fn bucket_by_day<'a, T, I>(entities: I, tz: Tz) -> DayBuckets<'a, T>
where
    T: Scheduled + 'a,
    I: IntoIterator<Item = &'a T>,
{
    bucket_report(entities, tz).buckets
}

pub fn bucket_report<'a, T, I>(entities: I, tz: Tz) -> BucketReport<'a, T>
where
    T: Scheduled + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut buckets = DayBuckets::new();
    let mut excluded = Vec::new();

    for entity in entities {
        match entity.scheduled_at() {
            Some(at) => buckets.push(at.local_in(tz), entity),
            None => {
                debug!(id = %entity.id(), "Leaving entry without a date out of the calendar");
                excluded.push(entity.id());
            }
        }
    }

    BucketReport { buckets, excluded }
}
