//! # RepairDesk DB
//!
//! Postgres access for the calendar: the schema, row models and the range
//! queries that load jobs and events for the days a view shows.

pub mod models;
pub mod repositories;
pub mod schema;
pub mod source;

pub mod mock;

use eyre::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

pub use source::{CalendarSource, PgCalendarSource};

pub type DbPool = Pool<Postgres>;

pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}
