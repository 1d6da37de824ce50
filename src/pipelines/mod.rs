mod completion;
mod extract;
mod scale;

pub use completion::Completion;
pub use extract::RecipeExtractor;
pub use scale::IngredientScaler;

use crate::error::ExtractError;
use crate::model::Recipe;

/// Outcome of one extraction request
pub type ExtractionResult = Result<Recipe, ExtractError>;
