use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub backend: BackendSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub suggestions: SuggestionSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    #[serde(default = "default_backend_timeout")]
    pub timeout_secs: u64,
}

fn default_backend_timeout() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

/// Listing snapshot cache; a TTL of 0 fetches fresh on every search
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default)]
    pub snapshot_ttl_secs: u64,
    #[serde(default = "default_snapshot_capacity")]
    pub snapshot_capacity: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            snapshot_ttl_secs: 0,
            snapshot_capacity: default_snapshot_capacity(),
        }
    }
}

fn default_snapshot_capacity() -> u64 { 256 }

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
    /// Radius used when annotating listings with nearby colleges
    #[serde(default = "default_college_radius")]
    pub college_radius_km: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_limit: default_max_limit(),
            college_radius_km: default_college_radius(),
        }
    }
}

fn default_max_limit() -> usize { 100 }
fn default_college_radius() -> f64 { 5.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionSettings {
    #[serde(default = "default_suggestion_limit")]
    pub default_limit: usize,
    #[serde(default = "default_recent_capacity")]
    pub recent_capacity: usize,
}

impl Default for SuggestionSettings {
    fn default() -> Self {
        Self {
            default_limit: default_suggestion_limit(),
            recent_capacity: default_recent_capacity(),
        }
    }
}

fn default_suggestion_limit() -> usize { crate::core::DEFAULT_SUGGESTION_LIMIT }
fn default_recent_capacity() -> usize { crate::core::RECENT_SEARCH_CAPACITY }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "full".to_string() }

impl Settings {
    /// Layered load: `config/default.toml`, then `config/local.toml`, then
    /// `PGFINDER__SECTION__KEY` environment variables, then the well-known
    /// overrides in [`substitute_env_vars`].
    pub fn load() -> Result<Self, ConfigError> {
        let layered = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(prefixed_env())
            .build()?;

        substitute_env_vars(layered)?.try_deserialize()
    }

    /// Load a single file plus prefixed environment variables
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(prefixed_env())
            .build()?
            .try_deserialize()
    }

    /// Parse settings from TOML text without consulting the environment
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

// PGFINDER__SERVER__PORT -> server.port
fn prefixed_env() -> Environment {
    Environment::with_prefix("PGFINDER")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Overrides that do not follow the prefix scheme
fn substitute_env_vars(layered: Config) -> Result<Config, ConfigError> {
    let overrides = [
        ("database.url", env::var("DATABASE_URL").ok()),
        ("backend.base_url", env::var("PGFINDER_BACKEND__BASE_URL").ok()),
        ("backend.api_key", env::var("PGFINDER_BACKEND__API_KEY").ok()),
    ];

    let mut builder = Config::builder().add_source(layered);
    for (key, value) in overrides {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            builder = builder.set_override(key, value)?;
        }
    }

    builder.build()
}
