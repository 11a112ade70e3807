use crate::models::DbJob;
use eyre::Result;
use repairdesk_core::models::Job;
use repairdesk_core::schedule::DateRange;
use sqlx::{Pool, Postgres};
use tracing::warn;
use uuid::Uuid;

/// Jobs of a company whose service day falls within `days`, oldest first.
pub async fn get_jobs_in_range(
    pool: &Pool<Postgres>,
    company_id: Uuid,
    days: DateRange,
) -> Result<Vec<Job>> {
    let rows = sqlx::query_as::<_, DbJob>(
        r#"
        SELECT id, company_id, client_name, service_type, issue_description,
               service_date, scheduled_time, priority, status, created_at
        FROM jobs
        WHERE company_id = $1 AND service_date BETWEEN $2 AND $3
        ORDER BY service_date ASC, created_at ASC
        "#,
    )
    .bind(company_id)
    .bind(days.start)
    .bind(days.end)
    .fetch_all(pool)
    .await?;

    Ok(into_jobs(rows))
}

/// Jobs of a company that have no service date at all.
pub async fn get_undated_jobs(pool: &Pool<Postgres>, company_id: Uuid) -> Result<Vec<Job>> {
    let rows = sqlx::query_as::<_, DbJob>(
        r#"
        SELECT id, company_id, client_name, service_type, issue_description,
               service_date, scheduled_time, priority, status, created_at
        FROM jobs
        WHERE company_id = $1 AND service_date IS NULL
        ORDER BY created_at ASC
        "#,
    )
    .bind(company_id)
    .fetch_all(pool)
    .await?;

    Ok(into_jobs(rows))
}

/// Converts rows, skipping any the core model cannot represent.
pub fn into_jobs(rows: Vec<DbJob>) -> Vec<Job> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row.id;
            Job::try_from(row)
                .map_err(|err| warn!(job_id = %id, %err, "Skipping job row"))
                .ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn row(priority: &str) -> DbJob {
        DbJob {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            client_name: "Client".to_string(),
            service_type: "Repair".to_string(),
            issue_description: String::new(),
            service_date: Some(Utc::now().date_naive()),
            scheduled_time: "09:00".to_string(),
            priority: priority.to_string(),
            status: "Received".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn skips_unconvertible_rows() {
        let rows = vec![row("High"), row("Whenever"), row("Low")];
        let ids = vec![rows[0].id, rows[2].id];

        let jobs = into_jobs(rows);
        assert_eq!(jobs.iter().map(|job| job.id).collect::<Vec<_>>(), ids);
    }
}
