use log::debug;
use scraper::{ElementRef, Html, Node, Selector};
use serde_json::Value;

use super::PageContent;

/// Containers used by popular recipe plugins, tried when a page has no
/// usable JSON-LD
const RECIPE_SELECTORS: &[&str] = &[
    ".recipe-callout",
    ".tasty-recipes",
    ".easyrecipe",
    ".innerrecipe",
    ".recipe-summary.wide",
    ".wprm-recipe-container",
    ".recipe-content",
    ".simple-recipe-pro",
    ".mv-recipe-card",
    "div[itemtype=\"http://schema.org/Recipe\"]",
    "div[itemtype=\"https://schema.org/Recipe\"]",
    "div.recipediv",
];

const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

pub(super) fn evaluate(html: &str) -> PageContent {
    let document = Html::parse_document(html);
    let candidate = find_structured_candidate(&document);
    let text = recipe_text(&document).or_else(|| body_text(&document));
    debug!(
        "page evaluated: candidate={}, text_len={}",
        candidate.is_some(),
        text.as_ref().map_or(0, String::len)
    );
    PageContent::new(candidate, text)
}

fn find_structured_candidate(document: &Html) -> Option<String> {
    let selector = Selector::parse("script[type='application/ld+json']").ok()?;

    for (index, script) in document.select(&selector).enumerate() {
        let raw = script.inner_html();
        let Some(json_ld) = parse_json_ld(&raw) else {
            debug!("skipping unparseable JSON-LD block {}", index);
            continue;
        };

        let items = match &json_ld {
            Value::Array(items) => items.iter().collect::<Vec<_>>(),
            other => vec![other],
        };

        for item in items {
            if let Some(recipe) = find_recipe(item) {
                debug!("found Recipe in JSON-LD block {}", index);
                return serde_json::to_string(recipe).ok();
            }
        }
    }

    None
}

/// Parse a JSON-LD block, retrying once after light cleanup
fn parse_json_ld(raw: &str) -> Option<Value> {
    serde_json::from_str(raw.trim())
        .or_else(|_| serde_json::from_str(&clean_json(raw)))
        .ok()
}

/// Minify outside string literals, then drop trailing commas and HTML
/// comment markers. String contents are left untouched.
fn clean_json(json_str: &str) -> String {
    let trimmed = json_str
        .trim()
        .trim_start_matches("<!--")
        .trim_end_matches("-->");

    let mut cleaned = String::with_capacity(trimmed.len());
    let mut in_string = false;
    let mut escaped = false;

    for c in trimmed.chars() {
        if in_string {
            cleaned.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                cleaned.push(c);
            }
            ']' | '}' => {
                // Trailing comma before a closing bracket
                if cleaned.ends_with(',') {
                    cleaned.pop();
                }
                cleaned.push(c);
            }
            c if c.is_whitespace() => {}
            _ => cleaned.push(c),
        }
    }

    debug!("cleaned JSON-LD: {} -> {} bytes", json_str.len(), cleaned.len());
    cleaned
}

/// The item itself when typed Recipe, else the first Recipe in its `@graph`
fn find_recipe(item: &Value) -> Option<&Value> {
    if is_recipe_type(item) {
        return Some(item);
    }
    item.get("@graph")?
        .as_array()?
        .iter()
        .find(|node| is_recipe_type(node))
}

fn is_recipe_type(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(kind)) => kind.eq_ignore_ascii_case("recipe"),
        Some(Value::Array(kinds)) => kinds
            .iter()
            .filter_map(Value::as_str)
            .any(|kind| kind.eq_ignore_ascii_case("recipe")),
        _ => false,
    }
}

fn recipe_text(document: &Html) -> Option<String> {
    let selector = Selector::parse(&RECIPE_SELECTORS.join(", ")).ok()?;
    let blocks: Vec<String> = document.select(&selector).map(element_text).collect();
    if blocks.is_empty() {
        return None;
    }
    debug!("matched {} recipe content containers", blocks.len());
    Some(collapse_whitespace(&blocks.join("\n\n")))
}

fn body_text(document: &Html) -> Option<String> {
    let selector = Selector::parse("body").ok()?;
    document
        .select(&selector)
        .next()
        .map(|body| collapse_whitespace(&element_text(body)))
}

/// Text content of an element, skipping script-like children
fn element_text(element: ElementRef) -> String {
    let mut out = String::new();
    push_text(element, &mut out);
    out
}

fn push_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if HIDDEN_ELEMENTS.contains(&el.name()) => {}
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    push_text(child_el, out);
                }
            }
            _ => {}
        }
    }
}

/// Replace every run of two or more whitespace characters with one space
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = String::new();
    for c in text.chars() {
        if c.is_whitespace() {
            run.push(c);
            continue;
        }
        flush_run(&mut out, &mut run);
        out.push(c);
    }
    flush_run(&mut out, &mut run);
    out.trim().to_string()
}

fn flush_run(out: &mut String, run: &mut String) {
    if run.chars().count() >= 2 {
        out.push(' ');
    } else {
        out.push_str(run);
    }
    run.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with_json_ld(json_ld: &str, body: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
            <html>
            <head>
                <script type="application/ld+json">{json_ld}</script>
            </head>
            <body>{body}</body>
            </html>"#
        )
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\n b\tc  "), "a b\tc");
        assert_eq!(collapse_whitespace("one two"), "one two");
    }

    #[test]
    fn test_is_recipe_type() {
        assert!(is_recipe_type(&serde_json::json!({"@type": "Recipe"})));
        assert!(is_recipe_type(&serde_json::json!({"@type": "recipe"})));
        assert!(is_recipe_type(&serde_json::json!({"@type": ["Recipe", "NewsArticle"]})));
        assert!(!is_recipe_type(&serde_json::json!({"@type": "WebPage"})));
        assert!(!is_recipe_type(&serde_json::json!({"name": "Recipe"})));
    }

    #[test]
    fn test_trailing_commas_are_tolerated() {
        let html = page_with_json_ld(r#"{"@type": "Recipe", "name": "Chili",}"#, "");
        let page = evaluate(&html);
        let candidate: Value = serde_json::from_str(&page.structured_candidate.unwrap()).unwrap();
        assert_eq!(candidate["name"], "Chili");
    }

    #[test]
    fn test_trailing_comma_before_newline() {
        let html = page_with_json_ld(
            "{\n  \"@type\": \"Recipe\",\n  \"name\": \"Chili\",\n}",
            "",
        );
        let page = evaluate(&html);
        assert!(page.structured_candidate.is_some());

        let html = page_with_json_ld(
            r#"{"@type": "Recipe", "recipeIngredient": ["beans",
                "tomatoes",
            ],
            }"#,
            "",
        );
        let candidate: Value =
            serde_json::from_str(&evaluate(&html).structured_candidate.unwrap()).unwrap();
        assert_eq!(candidate["recipeIngredient"][1], "tomatoes");
    }

    #[test]
    fn test_clean_json_leaves_strings_alone() {
        let cleaned = clean_json(r#"{"name": "Beans ,} and  rice \"x,]\"", }"#);
        let value: Value = serde_json::from_str(&cleaned).unwrap();
        assert_eq!(value["name"], r#"Beans ,} and  rice "x,]""#);
    }

    #[test]
    fn test_html_comment_wrapper_is_removed() {
        let html = page_with_json_ld(r#"<!-- {"@type": "Recipe", "name": "Soup"} -->"#, "");
        let candidate: Value =
            serde_json::from_str(&evaluate(&html).structured_candidate.unwrap()).unwrap();
        assert_eq!(candidate["name"], "Soup");
    }

    #[test]
    fn test_hidden_text_is_skipped() {
        let html = "<html><body><p>Visible</p><script>var hidden = 1;</script></body></html>";
        assert_eq!(evaluate(html).visible_text.as_deref(), Some("Visible"));
    }
}
