use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use url::Url;

use crate::language_utils;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO 639-1)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Number of catalog entries per processing batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: DeepSeek (OpenAI-compatible chat completions)
    #[default]
    DeepSeek,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::DeepSeek => "DeepSeek",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::DeepSeek => "deepseek".to_string(),
        }
    }
}

// Implement Display trait for TranslationProvider
impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for TranslationProvider
impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "deepseek" => Ok(Self::DeepSeek),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Remote translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    // @field: Provider type
    #[serde(default)]
    pub provider: TranslationProvider,

    // @field: Model name
    #[serde(default = "default_model")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    // @field: Sampling temperature (kept low for near-deterministic output)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    // @field: Output token bound for fragment-batch requests
    #[serde(default = "default_fragment_max_tokens")]
    pub fragment_max_tokens: u32,

    // @field: Output token bound for single-text requests
    #[serde(default = "default_text_max_tokens")]
    pub text_max_tokens: u32,

    // @field: Timeout for fragment-batch requests
    #[serde(default = "default_fragment_timeout_secs")]
    pub fragment_timeout_secs: u64,

    // @field: Timeout for single-text requests
    #[serde(default = "default_text_timeout_secs")]
    pub text_timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            model: default_model(),
            api_key: String::new(),
            endpoint: default_endpoint(),
            temperature: default_temperature(),
            fragment_max_tokens: default_fragment_max_tokens(),
            text_max_tokens: default_text_max_tokens(),
            fragment_timeout_secs: default_fragment_timeout_secs(),
            text_timeout_secs: default_text_timeout_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_language: default_source_language(),
            batch_size: default_batch_size(),
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration, returning an error describing the first problem found
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(anyhow!("Batch size must be a positive integer"));
        }

        language_utils::validate_language_code(&self.source_language)
            .map_err(|e| anyhow!("Invalid source language: {}", e))?;

        if self.translation.api_key.trim().is_empty() {
            return Err(anyhow!(
                "No API key configured. Pass --api-key or set the {} environment variable",
                API_KEY_ENV_VAR
            ));
        }

        if !(0.0..=2.0).contains(&self.translation.temperature) {
            return Err(anyhow!(
                "Temperature {} is out of range (0.0 - 2.0)",
                self.translation.temperature
            ));
        }

        Url::parse(&self.translation.endpoint)
            .map_err(|e| anyhow!("Invalid endpoint '{}': {}", self.translation.endpoint, e))?;

        Ok(())
    }
}

/// Environment variable consulted for the API key when none is passed explicitly
pub const API_KEY_ENV_VAR: &str = "DEEPSEEK_API_KEY";

/// Environment variable that overrides the service endpoint
pub const ENDPOINT_ENV_VAR: &str = "DEEPSEEK_API_URL";

fn default_source_language() -> String {
    "es".to_string()
}

fn default_batch_size() -> usize {
    10
}

fn default_model() -> String {
    "deepseek-chat".to_string()
}

fn default_endpoint() -> String {
    std::env::var(ENDPOINT_ENV_VAR).unwrap_or_else(|_| "https://api.deepseek.com/v1".to_string())
}

fn default_temperature() -> f32 {
    0.1
}

fn default_fragment_max_tokens() -> u32 {
    4000
}

fn default_text_max_tokens() -> u32 {
    2000
}

fn default_fragment_timeout_secs() -> u64 {
    90
}

fn default_text_timeout_secs() -> u64 {
    60
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level
    Error,
    /// Warning level
    Warn,
    /// Info level
    #[default]
    Info,
    /// Debug level
    Debug,
    /// Trace level
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}
