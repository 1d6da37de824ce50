use log::{debug, info, warn};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::completion::Completion;
use super::ExtractionResult;
use crate::config::ServiceConfig;
use crate::error::{ExtractError, RemoteError};
use crate::page::PageContent;
use crate::schema::decode_recipe;
use crate::services::{ExtractionResponse, ExtractionService, HttpRecipeService, ImagePayload};

const DEFAULT_DEADLINE: Duration = Duration::from_secs(15);

/// Turns page content or a photo into a recipe.
///
/// Page content goes through two tiers: the structured-metadata candidate is
/// decoded locally, and only when that is absent or fails is the visible text
/// sent to the extraction service. Photos go straight to the service. Decode
/// failures of the first tier are never reported; only the last tier's
/// outcome reaches the caller.
#[derive(Clone)]
pub struct RecipeExtractor {
    service: Arc<dyn ExtractionService>,
    deadline: Duration,
}

impl RecipeExtractor {
    pub fn new(service: Arc<dyn ExtractionService>) -> Self {
        RecipeExtractor {
            service,
            deadline: DEFAULT_DEADLINE,
        }
    }

    /// Extractor backed by the HTTP service described by `config`
    pub fn from_config(config: &ServiceConfig) -> Result<Self, RemoteError> {
        let service = HttpRecipeService::new(config)?;
        Ok(Self::new(Arc::new(service)).with_deadline(config.extraction_deadline()))
    }

    /// Deadline applied by the `*_with_deadline` and `spawn_*` methods
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Run the page pipeline to completion, without a deadline.
    pub async fn extract_page(&self, page: &PageContent) -> ExtractionResult {
        if let Some(candidate) = &page.structured_candidate {
            match decode_recipe(candidate.as_bytes()) {
                Ok(recipe) => {
                    info!("Decoded recipe from structured metadata");
                    return Ok(recipe);
                }
                Err(e) => {
                    debug!("Structured metadata rejected, falling back to page text: {}", e);
                }
            }
        }

        let Some(text) = &page.visible_text else {
            info!("No usable structured metadata and no page text");
            return Err(ExtractError::NoContentAvailable);
        };

        info!("Extracting recipe from {} characters of page text", text.len());
        let response = self.service.extract_text(text).await?;
        settle(response)
    }

    /// Run the image pipeline to completion, without a deadline.
    pub async fn extract_image(&self, image: &ImagePayload) -> ExtractionResult {
        if image.is_empty() {
            return Err(ExtractError::NoContentAvailable);
        }

        info!("Extracting recipe from {} byte image", image.len());
        let response = self.service.extract_image(image).await?;
        settle(response)
    }

    /// Page pipeline bounded by the extractor's deadline.
    pub async fn extract_page_with_deadline(&self, page: PageContent) -> ExtractionResult {
        let (tx, rx) = oneshot::channel();
        self.spawn_page(page, move |result| {
            let _ = tx.send(result);
        });
        await_delivery(rx).await
    }

    /// Image pipeline bounded by the extractor's deadline.
    pub async fn extract_image_with_deadline(&self, image: ImagePayload) -> ExtractionResult {
        let (tx, rx) = oneshot::channel();
        self.spawn_image(image, move |result| {
            let _ = tx.send(result);
        });
        await_delivery(rx).await
    }

    /// Run the page pipeline as a background task.
    ///
    /// `on_complete` is called exactly once: with the pipeline's result, or
    /// with [`ExtractError::Timeout`] if the deadline passes first. A result
    /// arriving after the timeout is dropped. The returned handle resolves
    /// when the pipeline task itself ends.
    pub fn spawn_page<F>(&self, page: PageContent, on_complete: F) -> JoinHandle<()>
    where
        F: FnOnce(ExtractionResult) + Send + 'static,
    {
        let this = self.clone();
        self.spawn_guarded(async move { this.extract_page(&page).await }, on_complete)
    }

    /// Run the image pipeline as a background task. See [`spawn_page`](Self::spawn_page).
    pub fn spawn_image<F>(&self, image: ImagePayload, on_complete: F) -> JoinHandle<()>
    where
        F: FnOnce(ExtractionResult) + Send + 'static,
    {
        let this = self.clone();
        self.spawn_guarded(async move { this.extract_image(&image).await }, on_complete)
    }

    fn spawn_guarded<Fut, F>(&self, work: Fut, on_complete: F) -> JoinHandle<()>
    where
        Fut: Future<Output = ExtractionResult> + Send + 'static,
        F: FnOnce(ExtractionResult) + Send + 'static,
    {
        let completion = Arc::new(Completion::new(on_complete));
        let deadline = self.deadline;

        let timer = {
            let completion = Arc::clone(&completion);
            tokio::spawn(async move {
                tokio::time::sleep(deadline).await;
                if completion.deliver(Err(ExtractError::Timeout(deadline))) {
                    warn!("Extraction timed out after {:?}", deadline);
                }
            })
        };

        tokio::spawn(async move {
            let result = work.await;
            if completion.deliver(result) {
                timer.abort();
            } else {
                debug!("Discarding extraction result that arrived after the deadline");
            }
        })
    }
}

fn settle(response: ExtractionResponse) -> ExtractionResult {
    match response {
        ExtractionResponse::Found(recipe) => {
            info!("Extraction service returned a recipe");
            Ok(recipe)
        }
        ExtractionResponse::NotFound => {
            info!("Extraction service found no recipe");
            Err(ExtractError::RemoteRejected)
        }
    }
}

async fn await_delivery(rx: oneshot::Receiver<ExtractionResult>) -> ExtractionResult {
    rx.await.unwrap_or_else(|_| {
        Err(ExtractError::RemoteUnavailable(
            "extraction task ended without a result".to_string(),
        ))
    })
}
