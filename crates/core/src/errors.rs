use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid time of day: {0:?}")]
    InvalidTime(String),

    #[error("Invalid slot: {hour:02}:{minute:02} is not a half-hour boundary")]
    InvalidSlot { hour: u8, minute: u8 },

    #[error("Slot {slot} on {date} is already booked ({count} entries)")]
    SlotTaken {
        date: String,
        slot: String,
        count: usize,
    },

    #[error("Slot {slot} is outside the business hours {start:02}:00-{end:02}:00")]
    SlotOutsideGrid { slot: String, start: u8, end: u8 },

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type CalendarResult<T> = Result<T, CalendarError>;
