//! What a loaded web page offers the extraction pipeline: an embedded
//! structured-metadata candidate and the page's visible text.
//!
//! Hosts that evaluate pages themselves (a headless browser, a share sheet)
//! hand over the two strings directly; hosts that only hold the HTML can use
//! [`PageContent::from_html`].

mod html;

use serde::{Deserialize, Deserializer};

/// Result of evaluating one page
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageContent {
    /// JSON text of the recipe object found in the page's JSON-LD
    #[serde(
        rename = "structuredCandidate",
        alias = "recipe",
        default,
        deserialize_with = "non_blank"
    )]
    pub structured_candidate: Option<String>,
    /// Human-readable page text
    #[serde(
        rename = "visibleText",
        alias = "textContent",
        default,
        deserialize_with = "non_blank"
    )]
    pub visible_text: Option<String>,
}

impl PageContent {
    /// Whitespace-only values are treated as absent.
    pub fn new(structured_candidate: Option<String>, visible_text: Option<String>) -> Self {
        PageContent {
            structured_candidate: structured_candidate.filter(|s| !s.trim().is_empty()),
            visible_text: visible_text.filter(|s| !s.trim().is_empty()),
        }
    }

    /// Compute the candidate and visible text from an HTML document.
    pub fn from_html(document: &str) -> Self {
        html::evaluate(document)
    }

    pub fn is_empty(&self) -> bool {
        self.structured_candidate.is_none() && self.visible_text.is_none()
    }
}

fn non_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
