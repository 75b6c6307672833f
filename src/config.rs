//! Function configuration loading from environment variables.
//!
//! Configuration is read once per process, at cold start, and validated before
//! any upload pipeline is built. A `.env` file is honoured for local runs.
//!
//! # Environment Variables
//!
//! ## Required Variables
//! - `COGNICITY_URL`: Base URL of the card record service (e.g. `https://data.example.org`)
//! - `CARD_IMAGE_BUCKET`: Bucket that receives uploaded card images
//!
//! ## Optional Variables
//! - `RUST_LOG`: Logging level (default: "info,cards=debug")
//! - `CARD_IMAGE_S3_ENDPOINT`: Custom S3 endpoint for S3-compatible stores
//! - `CARD_IMAGE_S3_FORCE_PATH_STYLE`: Use path-style URLs (default: false)
//! - `AWS_REGION`: Region for the object store, read by the AWS default chain

use reqwest::Url;
use thiserror::Error;

const REQUIRED_VARIABLES: [&str; 2] = ["COGNICITY_URL", "CARD_IMAGE_BUCKET"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<String>),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: String, reason: String },
}

/// Complete function configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the card record service; cards live under `{cognicity_url}/cards/{id}`
    pub cognicity_url: Url,

    /// Bucket where card images are stored
    pub card_image_bucket: String,

    /// Custom endpoint for S3-compatible object stores (MinIO, R2, localstack)
    pub s3_endpoint: Option<String>,

    /// Use path-style URLs instead of virtual-hosted-style
    pub s3_force_path_style: bool,
}

impl Config {
    /// Builds a configuration from its two required values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] if either value is empty and
    /// [`ConfigError::Invalid`] if the record service URL is not an absolute
    /// http(s) URL.
    pub fn new(cognicity_url: &str, card_image_bucket: &str) -> Result<Self, ConfigError> {
        let missing: Vec<String> = REQUIRED_VARIABLES
            .iter()
            .zip([cognicity_url, card_image_bucket])
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(key, _)| key.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        Ok(Self {
            cognicity_url: parse_base_url("COGNICITY_URL", cognicity_url.trim())?,
            card_image_bucket: card_image_bucket.trim().to_string(),
            s3_endpoint: None,
            s3_force_path_style: false,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// All missing required variables are reported together.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is missing or empty, or if a
    /// variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which resolves a variable name to
    /// its value. Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(
            &optional(&lookup, "COGNICITY_URL").unwrap_or_default(),
            &optional(&lookup, "CARD_IMAGE_BUCKET").unwrap_or_default(),
        )?;
        config.s3_endpoint = optional(&lookup, "CARD_IMAGE_S3_ENDPOINT");
        config.s3_force_path_style = env_or(&lookup, "CARD_IMAGE_S3_FORCE_PATH_STYLE", false)?;
        Ok(config)
    }
}

fn parse_base_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        key: key.to_string(),
        reason,
    };
    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be used as a base".to_string()));
    }
    Ok(url)
}

/// Trimmed value of `key`, or `None` when it is unset or blank.
fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

/// Load a variable with a default value.
///
/// # Errors
///
/// Returns an error if the variable is set but cannot be parsed.
fn env_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match optional(lookup, key) {
        Some(val) => val.parse::<T>().map_err(|e| ConfigError::Invalid {
            key: key.to_string(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
