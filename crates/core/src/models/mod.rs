pub mod calendar;
pub mod event;
pub mod job;
pub mod time;
pub mod timestamp;

pub use event::CalendarEvent;
pub use job::{Job, JobStatus, Priority};
pub use time::{Slot, TimeOfDay};
pub use timestamp::Timestamp;
