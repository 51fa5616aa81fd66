use crate::constants::{
    ADVANCED_OPPONENT_STATS_PATH, ADVANCED_STATS_PATH, BASIC_OPPONENT_STATS_PATH,
    BASIC_STATS_PATH, CONFERENCE_PATH, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECONDS,
    DEFAULT_USER_AGENT, SEASON_SUMMARY_PATH,
};
use crate::error::{Result, ScraperError};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

pub const BASE_URL_ENV: &str = "NCAAB_BASE_URL";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
    /// Keep fetched pages for the lifetime of the process
    pub cache: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            cache: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: String,
    pub file_prefix: String,
    pub json_file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: "logs".to_string(),
            file_prefix: "ncaab_stats.log".to_string(),
            json_file: true,
        }
    }
}

impl Config {
    /// Loads `path` if it exists, otherwise starts from defaults. `.env` and
    /// the process environment are applied on top.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let _ = dotenv::dotenv();
        let path = path.as_ref();

        let mut config = if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                ScraperError::Config(format!(
                    "Failed to read config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            Self::from_toml(&content)?
        } else {
            debug!("No config file at {}, using defaults", path.display());
            Self::default()
        };

        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config.source.base_url = base_url;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.source.base_url.trim().is_empty() {
            return Err(ScraperError::Config("source.base_url must not be empty".into()));
        }
        if self.source.timeout_seconds == 0 {
            return Err(ScraperError::Config(
                "source.timeout_seconds must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn stats_urls(&self) -> StatsUrls {
        StatsUrls::new(&self.source.base_url)
    }
}

/// Builds the season page URLs from a base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsUrls {
    base_url: String,
}

impl Default for StatsUrls {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl StatsUrls {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn season_page(&self, template: &str, season: u16) -> String {
        format!(
            "{}/{}",
            self.base_url,
            template.replace("{year}", &season.to_string())
        )
    }

    pub fn basic_stats(&self, season: u16) -> String {
        self.season_page(BASIC_STATS_PATH, season)
    }

    pub fn basic_opponent_stats(&self, season: u16) -> String {
        self.season_page(BASIC_OPPONENT_STATS_PATH, season)
    }

    pub fn advanced_stats(&self, season: u16) -> String {
        self.season_page(ADVANCED_STATS_PATH, season)
    }

    pub fn advanced_opponent_stats(&self, season: u16) -> String {
        self.season_page(ADVANCED_OPPONENT_STATS_PATH, season)
    }

    pub fn season_summary(&self, season: u16) -> String {
        self.season_page(SEASON_SUMMARY_PATH, season)
    }

    pub fn conference(&self, conference: &str, season: u16) -> String {
        self.season_page(&CONFERENCE_PATH.replace("{conference}", conference), season)
    }
}
