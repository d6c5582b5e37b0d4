use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

use crate::logging::LoggingConfig;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scraping: ScrapingConfig,
    pub sources: SourcesConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapingConfig {
    pub request_timeout_seconds: u64,
    pub max_retries: usize,
    pub retry_delay_seconds: u64,
    /// Courtesy delay between fetches against the same source.
    pub fetch_delay_ms: u64,
    pub user_agent: String,
}

impl Default for ScrapingConfig {
    fn default() -> Self {
        Self {
            request_timeout_seconds: 30,
            max_retries: 3,
            retry_delay_seconds: 2,
            fetch_delay_ms: 1000,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
        }
    }
}

/// What to collect from. Built once at startup and handed to the collector
/// immutably; nothing mutates source lists at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub imdb_title_ids: Vec<String>,
    pub subreddits: Vec<String>,
    pub reddit_query: String,
    pub reddit_limit: u32,
    pub wikipedia_category: String,
    pub wikipedia_search_limit: u32,
    pub tmdb_api_key: Option<String>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            imdb_title_ids: vec![
                "tt0111161".to_string(), // The Shawshank Redemption
                "tt0068646".to_string(), // The Godfather
                "tt0468569".to_string(), // The Dark Knight
                "tt0944947".to_string(), // Game of Thrones
                "tt0903747".to_string(), // Breaking Bad
                "tt4574334".to_string(), // Stranger Things
            ],
            subreddits: vec![
                "MovieLocations".to_string(),
                "FilmingLocations".to_string(),
                "OnLocation".to_string(),
                "movies".to_string(),
                "television".to_string(),
            ],
            reddit_query: "filming location".to_string(),
            reddit_limit: 100,
            wikipedia_category: "Category:Films_by_shooting_location".to_string(),
            wikipedia_search_limit: 50,
            tmdb_api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub default_format: String,
    pub output_directory: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_format: "json".to_string(),
            output_directory: PathBuf::from("exports"),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default location, falling back to
    /// defaults when no file exists yet.
    pub fn load() -> Result<Self> {
        let config_path = default_config_path();
        if config_path.exists() {
            Self::load_from_file(&config_path)
        } else {
            info!("no configuration file found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let mut config: AppConfig = toml::from_str(&content)?;
        ConfigOverrides::apply(&mut config);
        config.validate()?;
        info!(path = %path.as_ref().display(), "configuration loaded");
        Ok(config)
    }

    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!(path = %path.display(), "configuration saved");
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.scraping.user_agent.trim().is_empty() {
            return Err(anyhow::anyhow!("scraping user_agent must not be empty"));
        }
        if self.scraping.max_retries == 0 {
            return Err(anyhow::anyhow!("scraping max_retries must be > 0"));
        }
        if self.sources.reddit_limit == 0 || self.sources.reddit_limit > 100 {
            return Err(anyhow::anyhow!("sources reddit_limit must be in 1..=100"));
        }
        if self.sources.wikipedia_search_limit == 0 {
            return Err(anyhow::anyhow!("sources wikipedia_search_limit must be > 0"));
        }
        Ok(())
    }
}

/// Default configuration file path under the platform config directory.
pub fn default_config_path() -> PathBuf {
    directories::ProjectDirs::from("io", "setscout", "setscout")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("setscout.toml"))
}

/// Environment-based configuration overrides
pub struct ConfigOverrides;

impl ConfigOverrides {
    pub fn apply(config: &mut AppConfig) {
        if let Ok(delay) = std::env::var("SETSCOUT_FETCH_DELAY_MS") {
            if let Ok(delay) = delay.parse::<u64>() {
                config.scraping.fetch_delay_ms = delay;
            }
        }
        if let Ok(agent) = std::env::var("SETSCOUT_USER_AGENT") {
            config.scraping.user_agent = agent;
        }
        if let Ok(key) = std::env::var("SETSCOUT_TMDB_API_KEY") {
            config.sources.tmdb_api_key = Some(key);
        }
        if let Ok(level) = std::env::var("SETSCOUT_LOG_LEVEL") {
            config.logging.level = level;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.sources.subreddits.is_empty());
        assert!(!config.sources.imdb_title_ids.is_empty());
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = AppConfig::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.sources.reddit_query, config.sources.reddit_query);
        assert_eq!(parsed.scraping.fetch_delay_ms, config.scraping.fetch_delay_ms);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: AppConfig = toml::from_str(
            "[scraping]\nfetch_delay_ms = 250\n",
        )
        .unwrap();
        assert_eq!(config.scraping.fetch_delay_ms, 250);
        assert_eq!(config.scraping.max_retries, 3);
        assert_eq!(config.sources.reddit_limit, 100);
    }

    #[test]
    fn out_of_range_values_fail_validation() {
        let mut config = AppConfig::default();
        config.sources.reddit_limit = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.scraping.user_agent = " ".to_string();
        assert!(config.validate().is_err());
    }
}
