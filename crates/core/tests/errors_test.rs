use std::error::Error;
use repairdesk_core::errors::{CalendarError, CalendarResult};

#[test]
fn test_calendar_error_display() {
    let not_found = CalendarError::NotFound("Company not found".to_string());
    let validation = CalendarError::Validation("Invalid input".to_string());
    let invalid_time = CalendarError::InvalidTime("9h00".to_string());
    let invalid_slot = CalendarError::InvalidSlot { hour: 9, minute: 15 };
    let taken = CalendarError::SlotTaken {
        date: "2024-03-12".to_string(),
        slot: "09:00".to_string(),
        count: 2,
    };
    let outside = CalendarError::SlotOutsideGrid {
        slot: "21:00".to_string(),
        start: 7,
        end: 20,
    };
    let database = CalendarError::Database(eyre::eyre!("Database connection failed"));

    assert_eq!(not_found.to_string(), "Resource not found: Company not found");
    assert_eq!(validation.to_string(), "Validation error: Invalid input");
    assert_eq!(invalid_time.to_string(), "Invalid time of day: \"9h00\"");
    assert_eq!(
        invalid_slot.to_string(),
        "Invalid slot: 09:15 is not a half-hour boundary"
    );
    assert_eq!(
        taken.to_string(),
        "Slot 09:00 on 2024-03-12 is already booked (2 entries)"
    );
    assert_eq!(
        outside.to_string(),
        "Slot 21:00 is outside the business hours 07:00-20:00"
    );
    assert!(database.to_string().contains("Database error:"));
}

#[test]
fn test_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::Other, "IO error");
    let calendar_error = CalendarError::Internal(Box::new(io_error));

    assert!(calendar_error.source().is_some());
    assert!(calendar_error.to_string().contains("Internal server error:"));
}

#[test]
fn test_calendar_result() {
    let result: CalendarResult<i32> = Ok(42);
    assert_eq!(result.unwrap(), 42);

    let result: CalendarResult<i32> = Err(CalendarError::NotFound("Not found".to_string()));
    assert!(result.is_err());
}

#[test]
fn test_from_eyre_report() {
    let report = eyre::eyre!("connection reset");
    let calendar_error: CalendarError = report.into();

    assert!(matches!(calendar_error, CalendarError::Database(_)));
    assert!(calendar_error.to_string().contains("connection reset"));
}
