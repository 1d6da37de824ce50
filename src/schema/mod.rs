//! Tolerant decoding of schema.org `Recipe` JSON.
//!
//! Scalar fields that arrive with an unexpected type degrade to absent, the
//! polymorphic `image` field is resolved by [`images::decode_images`], and
//! `recipeInstructions` entries are discriminated by shape through the
//! untagged [`Instruction`] enum. The decoder never sanitizes text: values are
//! kept exactly as found so they can be re-encoded unchanged.

mod images;

pub use images::decode_images;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::DecodeError;
use crate::model::{Instruction, Recipe};

/// Wire shape of a recipe object. Converted into [`Recipe`] on decode.
#[derive(Debug, Deserialize)]
pub(crate) struct WireRecipe {
    #[serde(default, deserialize_with = "lenient_string")]
    name: Option<String>,
    #[serde(rename = "thumbnailUrl", default, deserialize_with = "lenient_string")]
    thumbnail_url: Option<String>,
    #[serde(default)]
    image: Option<Value>,
    #[serde(rename = "recipeIngredient", default)]
    recipe_ingredient: Option<Vec<String>>,
    #[serde(rename = "recipeInstructions", default)]
    recipe_instructions: Option<Vec<Instruction>>,
}

impl From<WireRecipe> for Recipe {
    fn from(wire: WireRecipe) -> Self {
        Recipe {
            name: wire.name,
            thumbnail_url: wire.thumbnail_url,
            images: wire
                .image
                .as_ref()
                .and_then(decode_images)
                .unwrap_or_default(),
            ingredients: wire.recipe_ingredient.unwrap_or_default(),
            instructions: wire.recipe_instructions.unwrap_or_default(),
        }
    }
}

/// A string, or `None` for null, absent or any other type.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// Decode a recipe from structured-metadata JSON bytes.
///
/// Fails only on invalid JSON, a non-object payload, or an ingredient or
/// instruction list of an unrecognised shape.
pub fn decode_recipe(json: &[u8]) -> Result<Recipe, DecodeError> {
    Ok(serde_json::from_slice(json)?)
}

/// Decode a recipe from an already-parsed JSON value.
pub fn decode_recipe_value(value: Value) -> Result<Recipe, DecodeError> {
    Ok(serde_json::from_value(value)?)
}

/// Decode and render a recipe as numbered plain text.
///
/// Returns an empty string when the payload does not decode.
pub fn plain_text_from_json(json: &[u8]) -> String {
    decode_recipe(json)
        .map(|recipe| recipe.to_plain_text())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HowToSection, HowToStep};

    #[test]
    fn test_basic_recipe() {
        let json = br#"{"name":"Test","image":"https://x/a.jpg","recipeIngredient":["Salt"],"recipeInstructions":["Mix well"]}"#;
        let recipe = decode_recipe(json).unwrap();

        assert_eq!(recipe.name.as_deref(), Some("Test"));
        assert_eq!(recipe.images, vec!["https://x/a.jpg"]);
        assert_eq!(recipe.ingredient_lines(), vec!["Salt"]);
        assert_eq!(recipe.instruction_lines(), vec!["Mix well"]);
    }

    #[test]
    fn test_all_fields_absent_is_valid() {
        let recipe = decode_recipe(br#"{"@type": "Recipe"}"#).unwrap();
        assert!(recipe.is_empty());
    }

    #[test]
    fn test_malformed_syntax_fails() {
        assert!(decode_recipe(br#"{"name": "Broken""#).is_err());
        assert!(decode_recipe(b"not json at all").is_err());
    }

    #[test]
    fn test_non_object_payload_fails() {
        assert!(decode_recipe(br#"[{"name": "In an array"}]"#).is_err());
        assert!(decode_recipe(br#""just a string""#).is_err());
    }

    #[test]
    fn test_scalar_fields_degrade_to_absent() {
        let json = br#"{"name": 42, "thumbnailUrl": ["https://x/t.jpg"], "image": 7, "recipeIngredient": ["Salt"]}"#;
        let recipe = decode_recipe(json).unwrap();
        assert_eq!(recipe.name, None);
        assert_eq!(recipe.thumbnail_url, None);
        assert!(recipe.images.is_empty());
        assert_eq!(recipe.ingredients, vec!["Salt"]);
    }

    #[test]
    fn test_null_fields_are_absent() {
        let json = br#"{"name": null, "image": null, "recipeIngredient": null, "recipeInstructions": null}"#;
        let recipe = decode_recipe(json).unwrap();
        assert!(recipe.is_empty());
    }

    #[test]
    fn test_ingredient_objects_are_rejected() {
        let json = br#"{"name": "X", "recipeIngredient": [{"name": "flour", "amount": "1 cup"}]}"#;
        assert!(decode_recipe(json).is_err());
    }

    #[test]
    fn test_instruction_shapes() {
        let json = br#"{
            "recipeInstructions": [
                "Plain step",
                {"@type": "HowToSection", "name": "Recipe Instructions", "itemListElement": [
                    {"@type": "HowToStep", "text": "Nested"}
                ]},
                {"@type": "HowToStep", "text": "Typed step", "url": "https://x/#step-3"},
                {"@type": "HowToStep"}
            ]
        }"#;
        let recipe = decode_recipe(json).unwrap();

        assert_eq!(
            recipe.instructions,
            vec![
                Instruction::PlainStep("Plain step".to_string()),
                Instruction::Section(HowToSection {
                    kind: Some("HowToSection".to_string()),
                    name: Some("Recipe Instructions".to_string()),
                    items: vec![HowToStep::new("Nested")],
                }),
                Instruction::Step(HowToStep::new("Typed step")),
                Instruction::Step(HowToStep {
                    kind: Some("HowToStep".to_string()),
                    text: None,
                }),
            ]
        );
        assert_eq!(
            recipe.instruction_lines(),
            vec!["Plain step", "Nested", "Typed step", ""]
        );
    }

    #[test]
    fn test_shape_wins_over_type_hint() {
        // A "HowToStep" carrying itemListElement is still a section
        let json = br#"{"recipeInstructions": [
            {"@type": "HowToStep", "name": "Recipe Instructions", "itemListElement": [{"text": "a"}]}
        ]}"#;
        let recipe = decode_recipe(json).unwrap();
        assert!(matches!(recipe.instructions[0], Instruction::Section(_)));
    }

    #[test]
    fn test_unrecognised_instruction_fails() {
        assert!(decode_recipe(br#"{"recipeInstructions": [42]}"#).is_err());
        assert!(decode_recipe(br#"{"recipeInstructions": "Just one string"}"#).is_err());
    }

    #[test]
    fn test_decoder_does_not_sanitize() {
        let json = br#"{"recipeIngredient": ["Salt &amp; pepper"], "recipeInstructions": ["<p>Stir</p>"]}"#;
        let recipe = decode_recipe(json).unwrap();
        assert_eq!(recipe.ingredients, vec!["Salt &amp; pepper"]);
        assert_eq!(
            recipe.instructions,
            vec![Instruction::PlainStep("<p>Stir</p>".to_string())]
        );
        assert_eq!(recipe.ingredient_lines(), vec!["Salt & pepper"]);
        assert_eq!(recipe.instruction_lines(), vec!["Stir"]);
    }

    #[test]
    fn test_round_trip() {
        let json = br#"{
            "name": "Soup",
            "thumbnailUrl": "https://x/t.jpg",
            "image": [{"url": "https://x/a.jpg"}, {"contentUrl": "https://x/b.jpg"}],
            "recipeIngredient": ["Water", "Water", "Salt"],
            "recipeInstructions": [
                "Boil",
                {"@type": "HowToSection", "name": "Prep", "itemListElement": [{"@type": "HowToStep", "text": "Chop"}]},
                {"itemListElement": []},
                {"text": "Serve"},
                {}
            ]
        }"#;
        let decoded = decode_recipe(json).unwrap();
        let encoded = serde_json::to_vec(&decoded).unwrap();
        let again = decode_recipe(&encoded).unwrap();
        assert_eq!(decoded, again);
        assert_eq!(again.images, vec!["https://x/a.jpg", "https://x/b.jpg"]);
    }

    #[test]
    fn test_plain_text_from_json() {
        let json = br#"{"name": "Toast", "recipeIngredient": ["Bread"], "recipeInstructions": ["Toast it"]}"#;
        assert_eq!(
            plain_text_from_json(json),
            "Toast\n\nIngredients:\n1. Bread\n\nInstructions:\n1. Toast it\n"
        );
        assert_eq!(plain_text_from_json(b"{oops"), "");
    }
}
