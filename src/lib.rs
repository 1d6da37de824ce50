//! Recipe extraction and normalization.
//!
//! Captured pages, photos and structured metadata all converge on one
//! canonical [`Recipe`]:
//!
//! - [`schema`] decodes schema.org recipe JSON, tolerating the many shapes
//!   sites publish.
//! - [`page`] describes what a loaded page offers: a JSON-LD candidate and
//!   its visible text.
//! - [`pipelines::RecipeExtractor`] tries the structured candidate first,
//!   falls back to the remote text service, and handles photos.
//! - [`pipelines::IngredientScaler`] rescales ingredient lists remotely.
//! - [`sanitize`] turns HTML-laden strings into display text.

pub mod config;
pub mod error;
pub mod model;
pub mod page;
pub mod pipelines;
pub mod sanitize;
pub mod schema;
pub mod services;

pub use config::{ImageEncoding, ServiceConfig};
pub use error::{ConfigError, DecodeError, ExtractError, RemoteError, ScaleError};
pub use model::{
    flatten_ingredients, flatten_instructions, HowToSection, HowToStep, Instruction, Recipe,
};
pub use page::PageContent;
pub use pipelines::{ExtractionResult, IngredientScaler, RecipeExtractor};
pub use sanitize::sanitize;
pub use schema::{decode_recipe, plain_text_from_json};
pub use services::{
    ExtractionResponse, ExtractionService, HttpRecipeService, ImagePayload, ScalingService,
};
