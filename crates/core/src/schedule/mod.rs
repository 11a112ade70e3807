//! Appointment slot model: grid generation, day bucketing, occupancy
//! resolution and the view-level board built on top of them.

pub mod board;
pub mod bucket;
pub mod grid;
pub mod occupancy;
pub mod view;

pub use board::CalendarBoard;
pub use bucket::{DayBuckets, bucket_by_day, day_key};
pub use grid::{SlotGrid, generate_slots};
pub use occupancy::{Occupancy, Occupant, check_bookable, resolve_occupancy};
pub use view::{DateRange, ViewMode, visible_range};
