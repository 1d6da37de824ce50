use serde::{Deserialize, Serialize};

use crate::sanitize::sanitize;

/// Name of the only section whose steps survive flattening
pub const RECIPE_INSTRUCTIONS_SECTION: &str = "Recipe Instructions";

/// Canonical recipe record.
///
/// Serializes with the same schema.org field names it is decoded from, so a
/// serialized recipe decodes back to an equal value. Deserialization goes
/// through the tolerant decoder in [`crate::schema`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "crate::schema::WireRecipe")]
pub struct Recipe {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "thumbnailUrl", skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(rename = "image", skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(rename = "recipeIngredient", skip_serializing_if = "Vec::is_empty")]
    pub ingredients: Vec<String>,
    #[serde(rename = "recipeInstructions", skip_serializing_if = "Vec::is_empty")]
    pub instructions: Vec<Instruction>,
}

/// One entry of `recipeInstructions`.
///
/// Discriminated by shape: a bare string, an object carrying
/// `itemListElement`, or any other object. Variant order is the order
/// in which shapes are tried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Instruction {
    PlainStep(String),
    Section(HowToSection),
    Step(HowToStep),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HowToSection {
    #[serde(rename = "@type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "itemListElement")]
    pub items: Vec<HowToStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HowToStep {
    #[serde(rename = "@type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl HowToStep {
    pub fn new(text: impl Into<String>) -> Self {
        HowToStep {
            kind: Some("HowToStep".to_string()),
            text: Some(text.into()),
        }
    }
}

impl Instruction {
    /// Sanitized display lines this instruction contributes.
    fn display_lines(&self) -> Vec<String> {
        match self {
            Instruction::PlainStep(text) => vec![sanitize(text)],
            Instruction::Section(section)
                if section.name.as_deref() == Some(RECIPE_INSTRUCTIONS_SECTION) =>
            {
                section.items.iter().map(step_line).collect()
            }
            Instruction::Section(_) => Vec::new(),
            Instruction::Step(step) => vec![step_line(step)],
        }
    }
}

fn step_line(step: &HowToStep) -> String {
    step.text.as_deref().map(sanitize).unwrap_or_default()
}

/// Flatten instructions into ordered display strings.
///
/// Plain steps and step objects contribute one line each (empty when a step
/// has no text). Sections contribute their steps only when named exactly
/// "Recipe Instructions"; every other section is dropped.
pub fn flatten_instructions(steps: &[Instruction]) -> Vec<String> {
    steps.iter().flat_map(Instruction::display_lines).collect()
}

/// Sanitize ingredient lines, keeping order and duplicates.
pub fn flatten_ingredients(items: &[String]) -> Vec<String> {
    items.iter().map(|item| sanitize(item)).collect()
}

impl Recipe {
    pub fn ingredient_lines(&self) -> Vec<String> {
        flatten_ingredients(&self.ingredients)
    }

    pub fn instruction_lines(&self) -> Vec<String> {
        flatten_instructions(&self.instructions)
    }

    /// True when no field carries any content.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.thumbnail_url.is_none()
            && self.images.is_empty()
            && self.ingredients.is_empty()
            && self.instructions.is_empty()
    }

    /// Numbered plain-text rendering used for sharing and the voice assistant.
    pub fn to_plain_text(&self) -> String {
        let title = self.name.as_deref().unwrap_or("Untitled Recipe");
        let ingredients = self.ingredient_lines();
        let instructions = self.instruction_lines();

        let mut output = format!("{title}\n\n");

        if !ingredients.is_empty() {
            output.push_str("Ingredients:\n");
            for (index, ingredient) in ingredients.iter().enumerate() {
                output.push_str(&format!("{}. {}\n", index + 1, ingredient));
            }
            output.push('\n');
        }

        if !instructions.is_empty() {
            output.push_str("Instructions:\n");
            for (index, instruction) in instructions.iter().enumerate() {
                output.push_str(&format!("{}. {}\n", index + 1, instruction));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(name: Option<&str>, steps: &[&str]) -> Instruction {
        Instruction::Section(HowToSection {
            kind: Some("HowToSection".to_string()),
            name: name.map(String::from),
            items: steps.iter().map(|s| HowToStep::new(*s)).collect(),
        })
    }

    #[test]
    fn test_flatten_mixed_variants_in_order() {
        let steps = vec![
            Instruction::PlainStep("Preheat oven".to_string()),
            section(Some(RECIPE_INSTRUCTIONS_SECTION), &["Mix", "Pour"]),
            Instruction::Step(HowToStep::new("Bake")),
        ];
        assert_eq!(
            flatten_instructions(&steps),
            vec!["Preheat oven", "Mix", "Pour", "Bake"]
        );
    }

    #[test]
    fn test_only_exact_section_name_contributes() {
        let steps = vec![
            section(Some("Prep"), &["Chop onions"]),
            section(None, &["Unnamed step"]),
            section(Some("recipe instructions"), &["Wrong case"]),
            section(Some(RECIPE_INSTRUCTIONS_SECTION), &["Kept"]),
        ];
        assert_eq!(flatten_instructions(&steps), vec!["Kept"]);
    }

    #[test]
    fn test_missing_step_text_becomes_empty_line() {
        let empty = HowToStep {
            kind: Some("HowToStep".to_string()),
            text: None,
        };
        let steps = vec![
            Instruction::Step(empty.clone()),
            Instruction::Section(HowToSection {
                kind: None,
                name: Some(RECIPE_INSTRUCTIONS_SECTION.to_string()),
                items: vec![empty, HowToStep::new("Serve")],
            }),
        ];
        assert_eq!(flatten_instructions(&steps), vec!["", "", "Serve"]);
    }

    #[test]
    fn test_flatten_sanitizes_text() {
        let steps = vec![
            Instruction::PlainStep("<p>Whisk &amp; fold</p>".to_string()),
            Instruction::Step(HowToStep::new("Rest 5&nbsp;min")),
        ];
        assert_eq!(
            flatten_instructions(&steps),
            vec!["Whisk & fold", "Rest 5\u{a0}min"]
        );
    }

    #[test]
    fn test_flatten_ingredients_keeps_duplicates() {
        let items = vec![
            "1 egg".to_string(),
            "Salt &amp; pepper".to_string(),
            "1 egg".to_string(),
        ];
        assert_eq!(
            flatten_ingredients(&items),
            vec!["1 egg", "Salt & pepper", "1 egg"]
        );
    }

    #[test]
    fn test_plain_text_rendering() {
        let recipe = Recipe {
            name: Some("Pancakes".to_string()),
            ingredients: vec!["2 eggs".to_string(), "1 cup flour".to_string()],
            instructions: vec![
                Instruction::PlainStep("Whisk".to_string()),
                Instruction::PlainStep("Fry".to_string()),
            ],
            ..Default::default()
        };
        assert_eq!(
            recipe.to_plain_text(),
            "Pancakes\n\nIngredients:\n1. 2 eggs\n2. 1 cup flour\n\nInstructions:\n1. Whisk\n2. Fry\n"
        );
    }

    #[test]
    fn test_plain_text_untitled_and_empty() {
        let recipe = Recipe::default();
        assert!(recipe.is_empty());
        assert_eq!(recipe.to_plain_text(), "Untitled Recipe\n\n");
    }
}
