use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use med_guide_data::cache::{DEFAULT_CACHE_TTL, DEFAULT_SWEEP_INTERVAL, MAX_CACHE_TTL};
use med_guide_data::fda::{OpenFdaConfig, DEFAULT_FDA_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT};
use med_guide_domain::services::{
    MedicationServiceConfig, DEFAULT_SEARCH_LIMIT, DEFAULT_SUGGESTION_LIMIT,
};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Upper bound for the sweep interval and the upstream timeout
pub const MAX_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Runtime settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub fda_api_base_url: String,
    pub fda_api_key: Option<String>,
    pub fda_timeout: Duration,
    pub cache_ttl: Duration,
    pub cache_sweep_interval: Duration,
    pub search_limit: u32,
    pub suggestion_limit: u32,
    pub environment: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            fda_api_base_url: DEFAULT_FDA_API_BASE_URL.to_string(),
            fda_api_key: None,
            fda_timeout: DEFAULT_REQUEST_TIMEOUT,
            cache_ttl: DEFAULT_CACHE_TTL,
            cache_sweep_interval: DEFAULT_SWEEP_INTERVAL,
            search_limit: DEFAULT_SEARCH_LIMIT,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            environment: DEFAULT_ENVIRONMENT.to_string(),
        }
    }
}

/// Parse `key` with `lookup`, falling back to `default` when unset or invalid
fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr + PartialOrd + Default + Copy + std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return default;
    };

    match raw.trim().parse::<T>() {
        Ok(value) if value > T::default() => value,
        _ => {
            warn!("Invalid value {:?} for {}, using default {}", raw, key, default);
            default
        }
    }
}

/// Parse a whole number of seconds, clamping values above `max`
fn parse_secs_or<F>(lookup: &F, key: &str, default: Duration, max: Duration) -> Duration
where
    F: Fn(&str) -> Option<String>,
{
    let secs = parse_or(lookup, key, default.as_secs());
    if secs > max.as_secs() {
        warn!("{} of {}s is too large, using {}s", key, secs, max.as_secs());
        return max;
    }
    Duration::from_secs(secs)
}

fn non_blank<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl AppConfig {
    /// Read settings from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            port: parse_or(&lookup, "PORT", defaults.port),
            fda_api_base_url: non_blank(&lookup, "FDA_API_BASE_URL")
                .unwrap_or(defaults.fda_api_base_url),
            fda_api_key: non_blank(&lookup, "FDA_API_KEY"),
            fda_timeout: parse_secs_or(
                &lookup,
                "FDA_TIMEOUT_SECS",
                defaults.fda_timeout,
                MAX_INTERVAL,
            ),
            cache_ttl: parse_secs_or(&lookup, "CACHE_TTL_SECS", defaults.cache_ttl, MAX_CACHE_TTL),
            cache_sweep_interval: parse_secs_or(
                &lookup,
                "CACHE_SWEEP_SECS",
                defaults.cache_sweep_interval,
                MAX_INTERVAL,
            ),
            search_limit: parse_or(&lookup, "SEARCH_LIMIT", defaults.search_limit),
            suggestion_limit: parse_or(&lookup, "SUGGESTION_LIMIT", defaults.suggestion_limit),
            environment: non_blank(&lookup, "APP_ENV").unwrap_or(defaults.environment),
        }
    }

    /// Upstream client settings
    pub fn fda_config(&self) -> OpenFdaConfig {
        OpenFdaConfig::default()
            .with_base_url(self.fda_api_base_url.clone())
            .with_api_key(self.fda_api_key.clone())
            .with_timeout(self.fda_timeout)
    }

    /// Medication service settings
    pub fn service_config(&self) -> MedicationServiceConfig {
        MedicationServiceConfig {
            search_limit: self.search_limit,
            suggestion_limit: self.suggestion_limit,
            cache_ttl: self.cache_ttl,
        }
    }
}
