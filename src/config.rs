//! Configuration management for the weather aggregator
//!
//! Handles loading configuration from an optional TOML file and environment
//! variables, and provides validation for all configuration settings. The
//! resulting [`AppConfig`] is built once at startup and passed down explicitly.

use crate::AggregatorError;
use crate::models::DisplayZone;
use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable naming the configuration file
pub const CONFIG_PATH_ENV: &str = "WEATHER_AGGREGATOR_CONFIG";

/// Prefix for structured environment overrides, e.g. `WEATHER_AGGREGATOR_SERVER__PORT`
const ENV_PREFIX: &str = "WEATHER_AGGREGATOR";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Weather provider settings
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_server_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_server_port")]
    pub port: u16,
}

/// How the three post-geocode provider calls are issued
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    /// One call after the other
    #[default]
    Sequential,
    /// All three at once; every call must still succeed
    Concurrent,
}

/// Weather provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key
    pub api_key: Option<String>,
    /// Base URL for the provider
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
    /// Sequential or concurrent fetching of conditions, forecast and UV index
    #[serde(default)]
    pub fetch_mode: FetchMode,
    /// IANA zone for the `day`/`time` fields; server local time when absent
    #[serde(default)]
    pub timezone: Option<String>,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    5000
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

fn default_weather_timeout() -> u32 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            timeout_seconds: default_weather_timeout(),
            fetch_mode: FetchMode::default(),
            timezone: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default file location and the environment
    pub fn load() -> Result<Self> {
        let path = env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.toml"));
        Self::load_from_path(&path)
    }

    /// Load configuration from the given file, then apply environment overrides
    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        let builder = Self::file_builder(config_path)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            // Unprefixed variables used by existing deployments
            .set_override_option("weather.api_key", env::var("OPENWEATHER_API_KEY").ok())
            .with_context(|| "Failed to apply OPENWEATHER_API_KEY")?
            .set_override_option("server.port", env::var("PORT").ok())
            .with_context(|| "Failed to apply PORT")?;

        Self::from_builder(builder)
    }

    fn file_builder(config_path: &Path) -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(
            File::from(config_path)
                .required(false)
                .format(FileFormat::Toml),
        )
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AppConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Apply default values to fields left empty
    pub fn apply_defaults(&mut self) {
        if self.server.host.is_empty() {
            self.server.host = default_server_host();
        }
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_weather_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_key()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_api_key(&self) -> Result<()> {
        match self.weather.api_key.as_deref() {
            None | Some("") => Err(AggregatorError::config(
                "Weather API key is required. Set OPENWEATHER_API_KEY or weather.api_key.",
            )
            .into()),
            Some(_) => Ok(()),
        }
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds > 300 {
            return Err(
                AggregatorError::config("Weather API timeout cannot exceed 300 seconds").into(),
            );
        }
        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(AggregatorError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(AggregatorError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(AggregatorError::config(
                "Weather API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        self.display_zone()?;
        Ok(())
    }

    /// Zone used to render the report's `day` and `time`
    pub fn display_zone(&self) -> crate::Result<DisplayZone> {
        match self.weather.timezone.as_deref() {
            None | Some("") => Ok(DisplayZone::Local),
            Some(name) => name.parse::<chrono_tz::Tz>().map(DisplayZone::Named).map_err(|_| {
                AggregatorError::config(format!("Unknown timezone '{name}'"))
            }),
        }
    }

    /// Address the HTTP server binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
