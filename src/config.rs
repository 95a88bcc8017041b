use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Top-level configuration for recipe retrieval
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub aggregator: AggregatorConfig,
    #[serde(default)]
    pub locator: LocatorConfig,
}

/// HTTP settings applied to every recipe fetch
#[derive(Debug, Deserialize, Clone)]
pub struct FetchConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Fan-out limits for one aggregation pass
#[derive(Debug, Deserialize, Clone)]
pub struct AggregatorConfig {
    /// Maximum number of fetches in flight at once
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,
    /// Deadline for the whole pass in seconds; unset means no deadline
    #[serde(default)]
    pub batch_timeout_secs: Option<u64>,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: default_max_concurrent_fetches(),
            batch_timeout_secs: None,
        }
    }
}

impl AggregatorConfig {
    pub fn batch_timeout(&self) -> Option<Duration> {
        self.batch_timeout_secs.map(Duration::from_secs)
    }
}

/// Where candidate recipe URLs come from
#[derive(Debug, Deserialize, Clone)]
pub struct LocatorConfig {
    /// Search endpoints queried with the ingredient list; takes priority over `candidates`
    #[serde(default)]
    pub endpoints: Vec<String>,
    /// Query parameter carrying the ingredient list
    #[serde(default = "default_query_param")]
    pub query_param: String,
    /// Fixed candidate URLs used when no endpoints are configured
    #[serde(default)]
    pub candidates: Vec<String>,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            endpoints: Vec::new(),
            query_param: default_query_param(),
            candidates: Vec::new(),
        }
    }
}

// Default value functions
fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; BestRecipeBot/1.0)".to_string()
}

fn default_max_concurrent_fetches() -> usize {
    4
}

fn default_query_param() -> String {
    "ingredients".to_string()
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with BEST_RECIPE__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: BEST_RECIPE__FETCH__TIMEOUT_SECS
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// `BEST_RECIPE__*` variables; URL lists are comma separated,
/// e.g. `BEST_RECIPE__LOCATOR__CANDIDATES=https://a.test/1,https://a.test/2`
fn environment() -> Environment {
    // Use double underscore for nested: BEST_RECIPE__AGGREGATOR__MAX_CONCURRENT_FETCHES
    Environment::with_prefix("BEST_RECIPE")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("locator.candidates")
        .with_list_parse_key("locator.endpoints")
}

/// Load configuration from `config.toml` (optional) and `BEST_RECIPE__*` environment variables
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        .add_source(File::with_name("config").required(false))
        .add_source(environment())
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{FileFormat, Map};

    fn from_vars(vars: &[(&str, &str)]) -> AppConfig {
        let mut source = Map::new();
        for (key, value) in vars {
            source.insert(key.to_string(), value.to_string());
        }
        Config::builder()
            .add_source(environment().source(Some(source)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_default_values() {
        let config = AppConfig::default();
        assert_eq!(config.fetch.timeout_secs, 30);
        assert_eq!(config.fetch.timeout(), Duration::from_secs(30));
        assert_eq!(config.aggregator.max_concurrent_fetches, 4);
        assert_eq!(config.aggregator.batch_timeout(), None);
        assert_eq!(config.locator.query_param, "ingredients");
        assert!(config.locator.endpoints.is_empty());
        assert!(config.locator.candidates.is_empty());
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let toml = r#"
            [aggregator]
            batch_timeout_secs = 5

            [locator]
            candidates = ["https://example.com/recipe/1", "https://example.com/recipe/2"]
        "#;

        let config: AppConfig = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.aggregator.batch_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.aggregator.max_concurrent_fetches, 4);
        assert_eq!(config.locator.candidates.len(), 2);
        assert_eq!(config.fetch.user_agent, default_user_agent());
    }

    #[test]
    fn test_load_config_without_file() {
        // No config.toml ships with the crate, so every field comes from its default
        let config = load_config().unwrap();
        assert!(config.aggregator.max_concurrent_fetches >= 1);
    }

    #[test]
    fn test_env_lists_are_comma_separated() {
        let config = from_vars(&[
            (
                "BEST_RECIPE__LOCATOR__CANDIDATES",
                "https://a.test/1,https://a.test/2",
            ),
            ("BEST_RECIPE__LOCATOR__ENDPOINTS", "https://search.test/find"),
            ("BEST_RECIPE__AGGREGATOR__MAX_CONCURRENT_FETCHES", "8"),
        ]);

        assert_eq!(
            config.locator.candidates,
            vec!["https://a.test/1", "https://a.test/2"]
        );
        assert_eq!(config.locator.endpoints, vec!["https://search.test/find"]);
        assert_eq!(config.aggregator.max_concurrent_fetches, 8);
    }

    #[test]
    fn test_env_scalars_are_not_split() {
        let config = from_vars(&[("BEST_RECIPE__FETCH__USER_AGENT", "Bot/1.0, like Gecko")]);
        assert_eq!(config.fetch.user_agent, "Bot/1.0, like Gecko");
    }
}
