use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{ExtractionResponse, ExtractionService, ImagePayload, ScalingService};
use crate::config::{ImageEncoding, ServiceConfig};
use crate::error::{DecodeError, RemoteError};

#[derive(Serialize)]
struct ScaleRequest<'a> {
    ingredients: &'a [String],
    #[serde(rename = "scaleFactor")]
    scale_factor: f64,
}

#[derive(Deserialize)]
struct ScaleResponse {
    #[serde(rename = "scaledIngredients")]
    scaled_ingredients: Vec<String>,
}

/// JSON-over-HTTPS client for the recipe extraction and scaling endpoints
pub struct HttpRecipeService {
    client: Client,
    extract_url: String,
    scale_url: String,
    image_encoding: ImageEncoding,
}

impl HttpRecipeService {
    /// Create a service client from configuration
    pub fn new(config: &ServiceConfig) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| RemoteError::Client(e.to_string()))?;

        Ok(HttpRecipeService {
            client,
            extract_url: config.extract_url(),
            scale_url: config.scale_url(),
            image_encoding: config.image_encoding,
        })
    }

    async fn post_extract(&self, body: &Value) -> Result<ExtractionResponse, RemoteError> {
        let response = self.client.post(&self.extract_url).json(body).send().await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            warn!(
                "extraction service error ({}): {}",
                status,
                String::from_utf8_lossy(&bytes)
            );
            return Err(RemoteError::Status(status.as_u16()));
        }

        ExtractionResponse::from_slice(&bytes).map_err(|e| {
            warn!(
                "failed to decode extraction response: {}\nResponse: {}",
                e,
                String::from_utf8_lossy(&bytes)
            );
            RemoteError::MalformedResponse(e)
        })
    }
}

#[async_trait]
impl ExtractionService for HttpRecipeService {
    async fn extract_text(&self, text: &str) -> Result<ExtractionResponse, RemoteError> {
        debug!("sending {} characters to text extraction", text.len());
        self.post_extract(&json!({ "textContent": text })).await
    }

    async fn extract_image(
        &self,
        image: &ImagePayload,
    ) -> Result<ExtractionResponse, RemoteError> {
        debug!(
            "sending {} byte {} image to extraction",
            image.len(),
            image.mime_type()
        );
        self.post_extract(&image.request_body(self.image_encoding))
            .await
    }
}

#[async_trait]
impl ScalingService for HttpRecipeService {
    async fn scale(
        &self,
        ingredients: &[String],
        factor: f64,
    ) -> Result<Vec<String>, RemoteError> {
        let response = self
            .client
            .post(&self.scale_url)
            .json(&ScaleRequest {
                ingredients,
                scale_factor: factor,
            })
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(RemoteError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        let body: ScaleResponse = serde_json::from_slice(&bytes)
            .map_err(|e| RemoteError::MalformedResponse(DecodeError::from(e)))?;
        Ok(body.scaled_ingredients)
    }
}
