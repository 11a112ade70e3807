//! # RepairDesk Core
//!
//! Scheduling logic for the RepairDesk field-service calendar. Everything in
//! this crate is a pure function over data that has already been loaded: no
//! I/O, no shared state.
//!
//! - **Models**: jobs, calendar events and the time-of-day / slot values
//! - **Schedule**: the half-hour grid, day bucketing, slot occupancy and the
//!   board a month / week / day view renders from
//! - **Config**: tenant settings passed explicitly into the core

/// Tenant calendar settings
pub mod config;
/// Error types shared across the workspace
pub mod errors;
/// Data model for jobs, events and times
pub mod models;
/// Slot grid, bucketing, occupancy and views
pub mod schedule;
