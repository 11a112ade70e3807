//! # API Configuration Module
//!
//! Loads the server and calendar settings from environment variables, with
//! defaults where appropriate.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `CALENDAR_START_HOUR` / `CALENDAR_END_HOUR`: Business hours (default: 7 / 20)
//! - `CALENDAR_TIMEZONE`: IANA timezone for calendar days (default: "UTC")
//! - `CALENDAR_WEEK_START`: First day of the week (default: "sunday")
//! - `BUSINESS_TYPE`: Tenant business type (default: "General")

use chrono::Weekday;
use chrono_tz::Tz;
use eyre::{eyre, Result, WrapErr};
use repairdesk_core::config::{BusinessType, CalendarConfig, DEFAULT_END_HOUR, DEFAULT_START_HOUR};
use std::env;
use tracing::Level;

/// Configuration for the RepairDesk API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use repairdesk_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Business hours, timezone and vocabulary handed to the calendar core
    pub calendar: CalendarConfig,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - The API_PORT value cannot be parsed as a u16
    /// - Any calendar setting is unreadable or the business hours are inconsistent
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;

        // Logging settings
        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        let calendar = calendar_from_vars(|key| env::var(key).ok())?;

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            calendar,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub fn parse_log_level(value: &str) -> Level {
    match value.to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Builds the calendar settings from a variable lookup.
pub fn calendar_from_vars<F>(lookup: F) -> Result<CalendarConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let start_hour = match lookup("CALENDAR_START_HOUR") {
        Some(value) => value.trim().parse().wrap_err("Invalid CALENDAR_START_HOUR value")?,
        None => DEFAULT_START_HOUR,
    };
    let end_hour = match lookup("CALENDAR_END_HOUR") {
        Some(value) => value.trim().parse().wrap_err("Invalid CALENDAR_END_HOUR value")?,
        None => DEFAULT_END_HOUR,
    };
    let timezone = match lookup("CALENDAR_TIMEZONE") {
        Some(value) => value
            .trim()
            .parse::<Tz>()
            .map_err(|err| eyre!("Invalid CALENDAR_TIMEZONE value: {err}"))?,
        None => Tz::UTC,
    };
    let week_starts_on = match lookup("CALENDAR_WEEK_START") {
        Some(value) => value
            .trim()
            .parse::<Weekday>()
            .map_err(|_| eyre!("Invalid CALENDAR_WEEK_START value: {value}"))?,
        None => Weekday::Sun,
    };
    let business_type = match lookup("BUSINESS_TYPE") {
        Some(value) => value.parse::<BusinessType>()?,
        None => BusinessType::General,
    };

    let calendar = CalendarConfig {
        start_hour,
        end_hour,
        timezone,
        week_starts_on,
        business_type,
    };
    calendar.validate()?;

    Ok(calendar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn calendar_defaults() {
        let calendar = calendar_from_vars(lookup(&[])).unwrap();
        assert_eq!(calendar, CalendarConfig::default());
    }

    #[test]
    fn calendar_overrides() {
        let calendar = calendar_from_vars(lookup(&[
            ("CALENDAR_START_HOUR", "8"),
            ("CALENDAR_END_HOUR", "18"),
            ("CALENDAR_TIMEZONE", "Europe/Berlin"),
            ("CALENDAR_WEEK_START", "monday"),
            ("BUSINESS_TYPE", "Plumber"),
        ]))
        .unwrap();

        assert_eq!(calendar.start_hour, 8);
        assert_eq!(calendar.end_hour, 18);
        assert_eq!(calendar.timezone, chrono_tz::Europe::Berlin);
        assert_eq!(calendar.week_starts_on, Weekday::Mon);
        assert_eq!(calendar.business_type, BusinessType::Plumber);
    }

    #[test]
    fn calendar_rejects_bad_values() {
        assert!(calendar_from_vars(lookup(&[("CALENDAR_TIMEZONE", "Mars/Olympus")])).is_err());
        assert!(calendar_from_vars(lookup(&[("CALENDAR_START_HOUR", "seven")])).is_err());
        assert!(calendar_from_vars(lookup(&[("CALENDAR_START_HOUR", "21")])).is_err());
        assert!(calendar_from_vars(lookup(&[("BUSINESS_TYPE", "Astronaut")])).is_err());
    }

    #[test]
    fn log_level_falls_back_to_info() {
        assert_eq!(parse_log_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_log_level("verbose"), Level::INFO);
    }
}
