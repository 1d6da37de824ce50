//! Remote recipe services consumed by the engine.
//!
//! The pipeline only sees the [`ExtractionService`] and [`ScalingService`]
//! traits; [`HttpRecipeService`] is the production implementation and tests
//! substitute in-process doubles.

mod http;
mod image;

pub use http::HttpRecipeService;
pub use image::ImagePayload;

use async_trait::async_trait;
use log::debug;
use serde_json::Value;

use crate::error::{DecodeError, RemoteError};
use crate::model::Recipe;
use crate::schema::decode_recipe_value;

/// Outcome of a successful round trip to an extraction endpoint
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionResponse {
    Found(Recipe),
    /// The service answered with `recipeFound: false`
    NotFound,
}

impl ExtractionResponse {
    /// Decode an extraction response body.
    ///
    /// `recipeFound: false` is the only "not found" signal; a missing flag
    /// means found. The recipe fields go through the tolerant decoder.
    pub fn from_slice(body: &[u8]) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_slice(body)?;
        if value.get("recipeFound").and_then(Value::as_bool) == Some(false) {
            debug!("extraction service reported recipeFound=false");
            return Ok(ExtractionResponse::NotFound);
        }
        Ok(ExtractionResponse::Found(decode_recipe_value(value)?))
    }
}

/// Normalizes free text or a photo into a recipe
#[async_trait]
pub trait ExtractionService: Send + Sync {
    /// Extract a recipe from visible page text
    async fn extract_text(&self, text: &str) -> Result<ExtractionResponse, RemoteError>;

    /// Extract a recipe from a photographed page
    async fn extract_image(&self, image: &ImagePayload)
        -> Result<ExtractionResponse, RemoteError>;
}

/// Rewrites ingredient quantities for a new yield
#[async_trait]
pub trait ScalingService: Send + Sync {
    async fn scale(&self, ingredients: &[String], factor: f64)
        -> Result<Vec<String>, RemoteError>;
}
