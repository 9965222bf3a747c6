//! Reader configuration stored as RON.
//!
//! Every field has a default, so a config file only needs the keys it changes.
//! The API key may also come from `--api-key` or `NEWSAPI_KEY`, which win over
//! the file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use newsdesk_core::{ApiConfig, ReaderSettings};
use newsdesk_engine::{FetchSettings, RetryPolicy};
use newsdesk_logging::{news_info, news_warn};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "newsdesk.ron";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("invalid config file {}: reader.{field} must be at least 1", path.display())]
    ZeroSetting { path: PathBuf, field: &'static str },
    #[error("no API key: set api.api_key in the config file, NEWSAPI_KEY, or --api-key")]
    MissingApiKey,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub reader: ReaderSettings,
    pub retry: RetryConfig,
    pub http: HttpConfig,
    /// Names offered by the `categories` command.
    pub categories: Vec<String>,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            reader: ReaderSettings::default(),
            retry: RetryConfig::default(),
            http: HttpConfig::default(),
            categories: [
                "technology",
                "business",
                "sports",
                "science",
                "health",
                "entertainment",
            ]
            .map(String::from)
            .to_vec(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            max_retries: policy.max_retries,
            base_delay_ms: u64::try_from(policy.base_delay.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            base_delay: Duration::from_millis(self.base_delay_ms),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        let settings = FetchSettings::default();
        Self {
            connect_timeout_secs: settings.connect_timeout.as_secs(),
            request_timeout_secs: settings.request_timeout.as_secs(),
            redirect_limit: settings.redirect_limit,
            max_bytes: settings.max_bytes,
        }
    }
}

impl HttpConfig {
    pub fn settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            redirect_limit: self.redirect_limit,
            max_bytes: self.max_bytes,
        }
    }
}

impl AppConfig {
    /// Loads `explicit` if given (it must exist), else `./newsdesk.ron` if it
    /// exists, else the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => Self::from_optional_file(Path::new(DEFAULT_CONFIG_FILE)),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.check_reader(path)?;
        news_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn from_optional_file(path: &Path) -> Result<Self, ConfigError> {
        match Self::from_file(path) {
            Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// A zero page size or page cap would leave every search without pages.
    fn check_reader(&self, path: &Path) -> Result<(), ConfigError> {
        let zero = if self.reader.page_size == 0 {
            Some("page_size")
        } else if self.reader.max_pages == 0 {
            Some("max_pages")
        } else {
            None
        };
        match zero {
            Some(field) => Err(ConfigError::ZeroSetting {
                path: path.to_path_buf(),
                field,
            }),
            None => Ok(()),
        }
    }

    /// Applies a key from the command line or environment, then requires one.
    pub fn with_api_key(mut self, override_key: Option<String>) -> Result<Self, ConfigError> {
        if let Some(key) = override_key.filter(|key| !key.trim().is_empty()) {
            self.api.api_key = key.trim().to_string();
        }
        if self.api.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(self)
    }

    pub fn level(&self) -> log::LevelFilter {
        newsdesk_logging::parse_level(&self.log_level).unwrap_or_else(|| {
            news_warn!("unknown log level {:?}, using info", self.log_level);
            log::LevelFilter::Info
        })
    }
}
