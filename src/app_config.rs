use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::formatters::Formatter;
use crate::language_utils;

/// Application configuration module
/// This module handles loading, validating and saving the settings shared by
/// the library client and the command line tool.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Language codes to try, in order of preference
    #[serde(default = "default_preferred_languages")]
    pub preferred_languages: Vec<String>,

    /// Output format used when none is given on the command line
    #[serde(default)]
    pub output_format: Formatter,

    /// HTTP transport settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// HTTP transport configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HttpConfig {
    /// Base URL of the captions service (watch pages live under it)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Accept-Language header; controls the language of track names
    #[serde(default = "default_accept_language")]
    pub accept_language: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_preferred_languages() -> Vec<String> {
    vec!["en".to_string()]
}

fn default_base_url() -> String {
    "https://www.youtube.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36".to_string()
}

fn default_accept_language() -> String {
    "en-US".to_string()
}

impl Config {
    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        for code in &self.preferred_languages {
            language_utils::validate_language_code(code)
                .with_context(|| format!("Invalid preferred language: {}", code))?;
        }

        if self.http.timeout_secs == 0 {
            return Err(anyhow!("HTTP timeout must be greater than zero"));
        }

        url::Url::parse(&self.http.base_url)
            .with_context(|| format!("Invalid base URL: {}", self.http.base_url))?;

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            preferred_languages: default_preferred_languages(),
            output_format: Formatter::default(),
            http: HttpConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
