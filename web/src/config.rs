use std::time::Duration;

use chrono::Weekday;
use thiserror::Error;

const DEFAULT_API_URL: &str = "http://localhost:5000/api";
const DEFAULT_TOKEN_KEY: &str = "token";
const DEFAULT_TOAST_MS: u64 = 4000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown weekday: {0}")]
    UnknownWeekday(String),

    #[error("Invalid toast duration: {0}")]
    InvalidDuration(String),
}

/// Days the calendar never offers, whatever the backend reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessRules {
    /// Saturday and Sunday unless overridden. An explicit empty list opens
    /// weekends too.
    pub closed_weekdays: Vec<Weekday>,
}

impl Default for BusinessRules {
    fn default() -> Self {
        Self {
            closed_weekdays: vec![Weekday::Sat, Weekday::Sun],
        }
    }
}

impl BusinessRules {
    pub fn is_closed(&self, weekday: Weekday) -> bool {
        self.closed_weekdays.contains(&weekday)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub token_storage_key: String,
    pub rules: BusinessRules,
    pub toast_duration: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            token_storage_key: DEFAULT_TOKEN_KEY.to_string(),
            rules: BusinessRules::default(),
            toast_duration: Duration::from_millis(DEFAULT_TOAST_MS),
        }
    }
}

impl ClientConfig {
    /// Configuration baked in at build time, so the server render and the
    /// hydrated client always agree.
    pub fn load() -> Self {
        Self::from_vars(
            option_env!("BOOKING_API_URL"),
            option_env!("BOOKING_AUTH_TOKEN_KEY"),
            option_env!("BOOKING_CLOSED_WEEKDAYS"),
            option_env!("BOOKING_TOAST_MS"),
        )
    }

    pub fn from_vars(
        api_url: Option<&str>,
        token_key: Option<&str>,
        closed_weekdays: Option<&str>,
        toast_ms: Option<&str>,
    ) -> Self {
        let mut config = Self::default();

        if let Some(url) = api_url.map(str::trim).filter(|url| !url.is_empty()) {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(key) = token_key.map(str::trim).filter(|key| !key.is_empty()) {
            config.token_storage_key = key.to_string();
        }

        if let Some(raw) = closed_weekdays {
            match parse_weekdays(raw) {
                Ok(days) => config.rules.closed_weekdays = days,
                Err(e) => leptos::logging::warn!("{}, keeping default closed days", e),
            }
        }

        if let Some(raw) = toast_ms {
            match parse_duration_ms(raw) {
                Ok(duration) => config.toast_duration = duration,
                Err(e) => leptos::logging::warn!("{}, using {}ms", e, DEFAULT_TOAST_MS),
            }
        }

        config
    }
}

/// Parses a comma separated weekday list such as `"sat,sun"`. An empty string
/// means every day is open.
pub fn parse_weekdays(raw: &str) -> Result<Vec<Weekday>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<Weekday>()
                .map_err(|_| ConfigError::UnknownWeekday(part.to_string()))
        })
        .collect()
}

fn parse_duration_ms(raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ConfigError::InvalidDuration(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_close_weekends() {
        let config = ClientConfig::from_vars(None, None, None, None);
        assert!(config.rules.is_closed(Weekday::Sat));
        assert!(config.rules.is_closed(Weekday::Sun));
        assert!(!config.rules.is_closed(Weekday::Mon));
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
    }

    #[test]
    fn overrides_are_applied() {
        let config = ClientConfig::from_vars(
            Some("https://api.example.com/v1/"),
            Some("auth_token"),
            Some("fri, sat"),
            Some("2500"),
        );
        assert_eq!(config.api_base_url, "https://api.example.com/v1");
        assert_eq!(config.token_storage_key, "auth_token");
        assert_eq!(config.rules.closed_weekdays, vec![Weekday::Fri, Weekday::Sat]);
        assert_eq!(config.toast_duration, Duration::from_millis(2500));
    }

    #[test]
    fn empty_weekday_list_opens_every_day() {
        assert_eq!(parse_weekdays(""), Ok(vec![]));

        let config = ClientConfig::from_vars(None, None, Some(""), None);
        assert!(config.rules.closed_weekdays.is_empty());
        assert!(!config.rules.is_closed(Weekday::Sat));
        assert!(!config.rules.is_closed(Weekday::Sun));
    }

    #[test]
    fn bad_values_fall_back_to_defaults() {
        assert_eq!(
            parse_weekdays("sat,funday"),
            Err(ConfigError::UnknownWeekday("funday".to_string()))
        );

        let config = ClientConfig::from_vars(None, Some("  "), Some("sat,funday"), Some("soon"));
        assert_eq!(config.token_storage_key, DEFAULT_TOKEN_KEY);
        assert_eq!(config.rules, BusinessRules::default());
        assert_eq!(config.toast_duration, Duration::from_millis(DEFAULT_TOAST_MS));
    }
}
