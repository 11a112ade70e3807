use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create jobs table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS jobs (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            company_id UUID NOT NULL,
            client_name VARCHAR(255) NOT NULL,
            service_type VARCHAR(255) NOT NULL,
            issue_description TEXT NOT NULL DEFAULT '',
            service_date DATE NULL,
            scheduled_time VARCHAR(16) NOT NULL DEFAULT '',
            priority VARCHAR(16) NOT NULL DEFAULT 'Medium',
            status VARCHAR(32) NOT NULL DEFAULT 'Received',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create calendar_events table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS calendar_events (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            company_id UUID NOT NULL,
            start_time TIMESTAMP WITH TIME ZONE NULL,
            client_name VARCHAR(255) NOT NULL,
            service_type VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_jobs_company_service_date ON jobs(company_id, service_date)",
        "CREATE INDEX IF NOT EXISTS idx_calendar_events_company_start ON calendar_events(company_id, start_time)",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
