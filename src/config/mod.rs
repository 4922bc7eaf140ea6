use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub mod rules;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub wikipedia: WikipediaConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WikipediaConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Tunables for one search run. All time values are in seconds.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_hard_timeout")]
    pub hard_timeout_secs: u64,

    #[serde(default = "default_soft_timeout_margin")]
    pub soft_timeout_margin_secs: u64,

    #[serde(default = "default_max_nodes_visited")]
    pub max_nodes_visited: usize,

    #[serde(default = "default_max_step_count")]
    pub max_step_count: u32,

    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    #[serde(default = "default_max_candidates_to_check")]
    pub max_candidates_to_check: usize,

    #[serde(default = "default_max_degree")]
    pub max_degree: usize,

    #[serde(default = "default_category_batch_size")]
    pub category_batch_size: usize,

    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,

    #[serde(default = "default_max_fetch_batches")]
    pub max_fetch_batches: usize,

    #[serde(default = "default_min_humans_for_early_exit")]
    pub min_humans_for_early_exit: usize,

    #[serde(default = "default_batch_check_timeout")]
    pub batch_check_timeout_secs: u64,

    #[serde(default = "default_fallback_node_cap")]
    pub fallback_node_cap: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_cache_capacity")]
    pub max_capacity: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: LogFormat,

    #[serde(default = "default_enable_console")]
    pub console: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl AppConfig {
    /// Builds the configuration from `WIKI_DEGREES__*` environment variables
    /// layered over the defaults, e.g.
    /// `WIKI_DEGREES__SEARCH__HARD_TIMEOUT_SECS=90`.
    pub fn from_env() -> Result<Self, crate::errors::WikiError> {
        let source = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("WIKI_DEGREES")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| crate::errors::WikiError::config(e.to_string()))?;

        source
            .try_deserialize()
            .map_err(|e| crate::errors::WikiError::config(e.to_string()))
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.wikipedia.request_timeout_secs)
    }
}

impl SearchConfig {
    pub fn hard_timeout(&self) -> Duration {
        Duration::from_secs(self.hard_timeout_secs)
    }

    /// Deadline for the soft in-loop check, a few seconds before the watchdog.
    pub fn soft_timeout(&self) -> Duration {
        Duration::from_secs(
            self.hard_timeout_secs
                .saturating_sub(self.soft_timeout_margin_secs),
        )
    }

    pub fn batch_check_timeout(&self) -> Duration {
        Duration::from_secs(self.batch_check_timeout_secs)
    }
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            hard_timeout_secs: default_hard_timeout(),
            soft_timeout_margin_secs: default_soft_timeout_margin(),
            max_nodes_visited: default_max_nodes_visited(),
            max_step_count: default_max_step_count(),
            batch_size: default_batch_size(),
            max_candidates_to_check: default_max_candidates_to_check(),
            max_degree: default_max_degree(),
            category_batch_size: default_category_batch_size(),
            concurrent_requests: default_concurrent_requests(),
            max_fetch_batches: default_max_fetch_batches(),
            min_humans_for_early_exit: default_min_humans_for_early_exit(),
            batch_check_timeout_secs: default_batch_check_timeout(),
            fallback_node_cap: default_fallback_node_cap(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            data_dir: default_cache_dir(),
            max_capacity: default_cache_capacity(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            console: default_enable_console(),
        }
    }
}

fn default_api_url() -> String {
    "https://en.wikipedia.org/w/api.php".to_string()
}
fn default_request_timeout() -> u64 {
    10
}
fn default_user_agent() -> String {
    "WikiDegrees/0.1.0 (https://github.com/username/wiki-degrees)".to_string()
}
fn default_hard_timeout() -> u64 {
    60
}
fn default_soft_timeout_margin() -> u64 {
    5
}
fn default_max_nodes_visited() -> usize {
    4000
}
fn default_max_step_count() -> u32 {
    200
}
fn default_batch_size() -> usize {
    20
}
fn default_max_candidates_to_check() -> usize {
    150
}
fn default_max_degree() -> usize {
    25
}
fn default_category_batch_size() -> usize {
    20
}
fn default_concurrent_requests() -> usize {
    10
}
fn default_max_fetch_batches() -> usize {
    3
}
fn default_min_humans_for_early_exit() -> usize {
    25
}
fn default_batch_check_timeout() -> u64 {
    20
}
fn default_fallback_node_cap() -> usize {
    15
}
fn default_cache_dir() -> PathBuf {
    PathBuf::from("cache")
}
fn default_cache_capacity() -> u64 {
    100_000
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}
fn default_enable_console() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_consistent() {
        let config = AppConfig::default();

        assert!(config.search.soft_timeout() < config.search.hard_timeout());
        assert!(config.search.max_degree <= config.search.max_candidates_to_check);
        assert!(config.search.fallback_node_cap <= config.search.max_degree);
        assert!(config.search.concurrent_requests > 0);
        assert!(config.wikipedia.api_url.starts_with("https://"));
    }

    #[test]
    fn test_soft_timeout_saturates() {
        let search = SearchConfig {
            hard_timeout_secs: 3,
            soft_timeout_margin_secs: 5,
            ..SearchConfig::default()
        };

        assert_eq!(search.soft_timeout(), Duration::from_secs(0));
    }
}
