use anyhow::{Context, Result, anyhow};
use chrono::FixedOffset;
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

/// Upper bound for the default reconciliation window (one leap year).
pub const MAX_WINDOW_DAYS: u32 = 366;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,

    // Rate limiting
    pub rate_protected_per_min: u32,

    pub api_prefix: String,

    // Attendance reconciliation
    /// Fixed civil offset used to decide what "today" is for default windows.
    pub attendance_utc_offset_minutes: i32,
    pub attendance_default_window_days: u32,
    pub attendance_half_day_hours: f64,
}

fn required(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("{key} must be set"))
}

fn parsed_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{key} has an invalid value {raw:?}: {e}")),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let config = Self {
            server_addr: required("SERVER_ADDR")?,
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,

            rate_protected_per_min: parsed_or("RATE_PROTECTED_PER_MIN", 1000)?,

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),

            // default is India Standard Time (+05:30)
            attendance_utc_offset_minutes: parsed_or("ATTENDANCE_UTC_OFFSET_MINUTES", 330)?,
            attendance_default_window_days: parsed_or("ATTENDANCE_DEFAULT_WINDOW_DAYS", 31)?,
            attendance_half_day_hours: parsed_or("ATTENDANCE_HALF_DAY_HOURS", 4.0)?,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.attendance_offset()?;
        if !(1..=MAX_WINDOW_DAYS).contains(&self.attendance_default_window_days) {
            return Err(anyhow!(
                "ATTENDANCE_DEFAULT_WINDOW_DAYS must be between 1 and {MAX_WINDOW_DAYS}"
            ));
        }
        if !self.attendance_half_day_hours.is_finite() || self.attendance_half_day_hours < 0.0 {
            return Err(anyhow!("ATTENDANCE_HALF_DAY_HOURS must be a non-negative number"));
        }
        Ok(())
    }

    /// The configured attendance timezone as a chrono offset.
    pub fn attendance_offset(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.attendance_utc_offset_minutes * 60).ok_or_else(|| {
            anyhow!(
                "ATTENDANCE_UTC_OFFSET_MINUTES out of range: {}",
                self.attendance_utc_offset_minutes
            )
        })
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Self {
            database_url: "mysql://localhost/hrm_test".to_string(),
            jwt_secret: "test-secret".to_string(),
            server_addr: "127.0.0.1:0".to_string(),
            rate_protected_per_min: 1000,
            api_prefix: "/api".to_string(),
            attendance_utc_offset_minutes: 330,
            attendance_default_window_days: 31,
            attendance_half_day_hours: 4.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_offset_is_ist() {
        let offset = Config::for_tests().attendance_offset().unwrap();
        assert_eq!(offset.local_minus_utc(), 5 * 3600 + 30 * 60);
    }

    #[test]
    fn window_days_are_bounded() {
        let mut config = Config::for_tests();
        assert!(config.validate().is_ok());

        config.attendance_default_window_days = 0;
        assert!(config.validate().is_err());

        config.attendance_default_window_days = MAX_WINDOW_DAYS;
        assert!(config.validate().is_ok());

        config.attendance_default_window_days = MAX_WINDOW_DAYS + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn out_of_range_offset_is_rejected() {
        let mut config = Config::for_tests();
        config.attendance_utc_offset_minutes = 24 * 60;
        assert!(config.attendance_offset().is_err());
    }
}
