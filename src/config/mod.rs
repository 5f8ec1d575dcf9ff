use std::time::Duration;

use chrono::FixedOffset;
use url::Url;

use crate::errors::{NewsError, NewsResult};

pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 20 * 60;
pub const DEFAULT_REFRESH_DELAY_MS: u64 = 2_000;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
/// India Standard Time, the exchange's local clock.
pub const DEFAULT_DISPLAY_UTC_OFFSET_MINUTES: i32 = 330;
pub const DEFAULT_RETENTION_HOURS: u64 = 48;

#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: Url,
    pub poll_interval: Duration,
    pub refresh_delay: Duration,
    pub http_timeout: Duration,
    pub display_offset: FixedOffset,
    pub retention_hours: u64,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Load `.env` files and the environment. `backend_url`, when given,
    /// takes precedence over `NEWS_BACKEND_URL`.
    pub fn load(backend_url: Option<&str>) -> NewsResult<Self> {
        // Try to load .env from executable's directory first
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        Self::from_vars(|key| match (key, backend_url) {
            ("NEWS_BACKEND_URL", Some(url)) => Some(url.to_string()),
            _ => std::env::var(key).ok(),
        })
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> NewsResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = lookup("NEWS_BACKEND_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| NewsError::MissingEnvVar("NEWS_BACKEND_URL".to_string()))?;
        let backend_url = parse_backend_url(&backend_url)?;

        let poll_interval = Duration::from_secs(parse_number(
            &lookup,
            "NEWS_POLL_INTERVAL_SECS",
            DEFAULT_POLL_INTERVAL_SECS,
        )?);
        if poll_interval.is_zero() {
            return Err(NewsError::Config(
                "NEWS_POLL_INTERVAL_SECS must be greater than zero".to_string(),
            ));
        }

        let refresh_delay = Duration::from_millis(parse_number(
            &lookup,
            "NEWS_REFRESH_DELAY_MS",
            DEFAULT_REFRESH_DELAY_MS,
        )?);

        let http_timeout = Duration::from_secs(parse_number(
            &lookup,
            "NEWS_HTTP_TIMEOUT_SECS",
            DEFAULT_HTTP_TIMEOUT_SECS,
        )?);

        let offset_minutes: i32 = parse_number(
            &lookup,
            "NEWS_DISPLAY_UTC_OFFSET_MINUTES",
            DEFAULT_DISPLAY_UTC_OFFSET_MINUTES,
        )?;
        let display_offset = offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                NewsError::Config(format!(
                    "NEWS_DISPLAY_UTC_OFFSET_MINUTES out of range: {}",
                    offset_minutes
                ))
            })?;

        let retention_hours =
            parse_number(&lookup, "NEWS_RETENTION_HOURS", DEFAULT_RETENTION_HOURS)?;

        Ok(Self {
            backend_url,
            poll_interval,
            refresh_delay,
            http_timeout,
            display_offset,
            retention_hours,
        })
    }
}

pub fn parse_backend_url(raw: &str) -> NewsResult<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| NewsError::InvalidUrl(format!("{}: {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(NewsError::InvalidUrl(format!(
            "unsupported scheme '{}' in {}",
            other, raw
        ))),
    }
}

fn parse_number<F, T>(lookup: &F, key: &str, default: T) -> NewsResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| NewsError::Config(format!("{} is not a valid number: {}", key, raw))),
        _ => Ok(default),
    }
}
