use log::{debug, warn};
use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::error::{RemoteError, ScaleError};
use crate::services::{HttpRecipeService, ScalingService};

/// Rescales ingredient lists through the remote scaling service.
///
/// No quantity parsing happens locally; the service rewrites the lines.
#[derive(Clone)]
pub struct IngredientScaler {
    service: Arc<dyn ScalingService>,
}

impl IngredientScaler {
    pub fn new(service: Arc<dyn ScalingService>) -> Self {
        IngredientScaler { service }
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self, RemoteError> {
        Ok(Self::new(Arc::new(HttpRecipeService::new(config)?)))
    }

    /// Scale `ingredients` by `factor` in one round trip.
    ///
    /// A factor of exactly 1 returns the list unchanged without a call.
    pub async fn scale(
        &self,
        ingredients: &[String],
        factor: f64,
    ) -> Result<Vec<String>, ScaleError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ScaleError::InvalidFactor(factor));
        }
        if factor == 1.0 {
            debug!("Scale factor is 1, skipping scaling service");
            return Ok(ingredients.to_vec());
        }

        debug!("Scaling {} ingredients by {}", ingredients.len(), factor);
        Ok(self.service.scale(ingredients, factor).await?)
    }

    /// Scale `current` in place. On failure the list is left untouched.
    pub async fn apply(&self, current: &mut Vec<String>, factor: f64) -> Result<(), ScaleError> {
        let result = self.scale(current, factor).await;
        match result {
            Ok(scaled) => {
                *current = scaled;
                Ok(())
            }
            Err(e) => {
                warn!("Scaling failed, keeping previous ingredients: {}", e);
                Err(e)
            }
        }
    }
}
