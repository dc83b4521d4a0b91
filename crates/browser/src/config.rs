//! Runtime configuration, read from `HOLOCRON_*` environment variables.
//!
//! Every setting has a default. A missing variable is logged at `info`, an
//! unparsable one at `warn`; both fall back to the default.

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use pipeline::DEFAULT_PAGE_SIZE;
use sources::{DEFAULT_MAX_CONCURRENCY, SharedSource};
use swapi_client::{ClientError, DEFAULT_BASE_URL, SwapiClient};

pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

const SESSION_DIR: &str = ".holocron";
const SESSION_FILE: &str = "session.json";
const FALLBACK_SESSION_FILE: &str = ".holocron-session.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserConfig {
    pub base_url: String,
    pub page_size: usize,
    pub max_concurrency: usize,
    pub request_timeout: Duration,
    pub session_file: PathBuf,
}

impl BrowserConfig {
    /// Read the configuration from the process environment
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the configuration through `lookup` instead of the environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let session_file = match lookup("HOLOCRON_SESSION_FILE") {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => {
                let path = default_session_file(lookup("HOME"));
                info!(
                    "HOLOCRON_SESSION_FILE not set, using default: {}",
                    path.display()
                );
                path
            }
        };

        Self {
            base_url: try_load(&lookup, "HOLOCRON_BASE_URL", DEFAULT_BASE_URL.to_string()),
            page_size: try_load(&lookup, "HOLOCRON_PAGE_SIZE", DEFAULT_PAGE_SIZE).max(1),
            max_concurrency: try_load(&lookup, "HOLOCRON_MAX_CONCURRENCY", DEFAULT_MAX_CONCURRENCY)
                .max(1),
            request_timeout: Duration::from_secs(try_load(
                &lookup,
                "HOLOCRON_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )),
            session_file,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max.max(1);
        self
    }

    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = path.into();
        self
    }

    /// Build the HTTP data source for this configuration
    pub fn connect(&self) -> Result<SharedSource, ClientError> {
        let client = SwapiClient::new(self.base_url.clone(), self.request_timeout)?;
        Ok(Arc::new(client))
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            session_file: default_session_file(env::var("HOME").ok()),
        }
    }
}

fn default_session_file(home: Option<String>) -> PathBuf {
    match home.filter(|home| !home.is_empty()) {
        Some(home) => PathBuf::from(home).join(SESSION_DIR).join(SESSION_FILE),
        None => PathBuf::from(FALLBACK_SESSION_FILE),
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        info!("{key} not set, using default: {default}");
        return default;
    };

    raw.trim().parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
        default
    })
}
