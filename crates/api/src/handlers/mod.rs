/// Calendar board, slot and data-quality queries
pub mod calendar;
