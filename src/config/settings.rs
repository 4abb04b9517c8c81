use super::files::{atomic_write, read_file};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// The backend is asked for at most this many tasks
pub const DEFAULT_FETCH_LIMIT: usize = 4;

/// Settings stored in config.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_base_url: String,
    pub fetch_limit: usize,
    pub notice_ttl_secs: i64,
    pub max_notices: usize,
    pub tick_ms: u64,
    /// `None` means requests never time out
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            fetch_limit: DEFAULT_FETCH_LIMIT,
            notice_ttl_secs: 4,
            max_notices: 5,
            tick_ms: 100,
            request_timeout_secs: None,
        }
    }
}

/// Values given on the command line, which win over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub fetch_limit: Option<usize>,
}

impl Settings {
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(url) = overrides.api_url {
            self.api_base_url = url;
        }
        if let Some(limit) = overrides.fetch_limit {
            self.fetch_limit = limit;
        }
        self
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(10))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn notice_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.notice_ttl_secs.max(1))
    }
}

/// Load settings, falling back to defaults when the file is missing
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    match read_file(path)? {
        Some(content) => serde_json::from_str(&content)
            .with_context(|| format!("Invalid settings file: {}", path.display())),
        None => Ok(Settings::default()),
    }
}

pub fn save_settings<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    atomic_write(path, &json)?;
    Ok(())
}
