use config::{Config, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::error::ConfigError;

/// How image bytes are wrapped in an image extraction request
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ImageEncoding {
    /// `{"inlineData": {"data": ..., "mimeType": ...}}`
    #[default]
    InlineData,
    /// `"data:<mime>;base64,..."`
    DataUrl,
}

/// Remote recipe service configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    /// Scheme and host of the recipe service
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path of the text/image extraction endpoint
    #[serde(default = "default_extract_path")]
    pub extract_path: String,
    /// Path of the ingredient scaling endpoint
    #[serde(default = "default_scale_path")]
    pub scale_path: String,
    /// Per-request HTTP timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Deadline for one whole extraction request in seconds
    #[serde(default = "default_extraction_deadline_secs")]
    pub extraction_deadline_secs: u64,
    #[serde(default)]
    pub image_encoding: ImageEncoding,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            extract_path: default_extract_path(),
            scale_path: default_scale_path(),
            request_timeout_secs: default_request_timeout_secs(),
            extraction_deadline_secs: default_extraction_deadline_secs(),
            image_encoding: ImageEncoding::default(),
            user_agent: default_user_agent(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_CAPTURE__ prefix
    /// 2. recipe-capture.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_CAPTURE__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn extract_url(&self) -> String {
        join_url(&self.base_url, &self.extract_path)
    }

    pub fn scale_url(&self) -> String {
        join_url(&self.base_url, &self.scale_path)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn extraction_deadline(&self) -> Duration {
        Duration::from_secs(self.extraction_deadline_secs)
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://yes-chef.ai".to_string()
}

fn default_extract_path() -> String {
    "/api/recipe/extract".to_string()
}

fn default_scale_path() -> String {
    "/api/recipe/scale".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_extraction_deadline_secs() -> u64 {
    15
}

fn default_user_agent() -> String {
    format!("recipe-capture/{}", env!("CARGO_PKG_VERSION"))
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Load configuration from file and environment variables
pub fn load_config() -> Result<ServiceConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe-capture").required(false))
        // Use double underscore for nested: RECIPE_CAPTURE__BASE_URL
        .add_source(
            Environment::with_prefix("RECIPE_CAPTURE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
