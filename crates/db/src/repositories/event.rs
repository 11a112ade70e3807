use crate::models::DbCalendarEvent;
use chrono::{DateTime, Utc};
use eyre::Result;
use repairdesk_core::models::CalendarEvent;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Events of a company starting in `[from, to)`, in start order.
pub async fn get_events_in_range(
    pool: &Pool<Postgres>,
    company_id: Uuid,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<CalendarEvent>> {
    let rows = sqlx::query_as::<_, DbCalendarEvent>(
        r#"
        SELECT id, company_id, start_time, client_name, service_type, created_at
        FROM calendar_events
        WHERE company_id = $1 AND start_time >= $2 AND start_time < $3
        ORDER BY start_time ASC, created_at ASC
        "#,
    )
    .bind(company_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(CalendarEvent::from).collect())
}
