//! Markup stripping for scraped recipe strings.
//!
//! Ingredient and instruction text pulled out of JSON-LD frequently carries
//! HTML entities (`&amp;`, `&#39;`) and sometimes whole tags (`<p>`, `<a>`).
//! [`sanitize`] turns such strings into readable plain text and leaves
//! anything that is already plain text untouched.

use html_escape::decode_html_entities;
use scraper::{ElementRef, Html, Node};

/// Elements that start a new line in the plain-text output
const BLOCK_ELEMENTS: &[&str] = &[
    "p", "div", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "tr", "section", "article",
    "blockquote",
];

/// Elements whose text is never shown
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Upper bound on decode/strip rounds for multiply-escaped input
const MAX_PASSES: usize = 8;

/// Strip markup and resolve entities, returning human-readable text.
///
/// Never fails: input that does not look like markup is only entity-decoded,
/// and input with neither tags nor entities is returned as-is. Escaped markup
/// (`&lt;b&gt;`) is decoded and then stripped, so the result is a fixed point:
/// sanitizing it again returns it unchanged.
pub fn sanitize(raw: &str) -> String {
    let mut text = sanitize_pass(raw);
    for _ in 1..MAX_PASSES {
        let next = sanitize_pass(&text);
        if next == text {
            break;
        }
        text = next;
    }
    text
}

fn sanitize_pass(raw: &str) -> String {
    if looks_like_markup(raw) {
        strip_markup(raw)
    } else if raw.contains('&') {
        decode_html_entities(raw).into_owned()
    } else {
        raw.to_string()
    }
}

/// [`sanitize`] for byte strings of unknown encoding.
pub fn sanitize_bytes(raw: &[u8]) -> String {
    sanitize(&String::from_utf8_lossy(raw))
}

/// A `<` directly followed by a tag-name start, closing slash, or `!`.
fn looks_like_markup(s: &str) -> bool {
    s.as_bytes()
        .windows(2)
        .any(|w| w[0] == b'<' && (w[1].is_ascii_alphabetic() || w[1] == b'/' || w[1] == b'!'))
}

fn strip_markup(raw: &str) -> String {
    let fragment = Html::parse_fragment(raw);
    let mut out = String::with_capacity(raw.len());
    collect_text(fragment.root_element(), &mut out);
    out.trim().to_string()
}

fn collect_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => push_collapsed(out, text),
            Node::Element(el) => {
                let name = el.name();
                if name == "br" {
                    break_line(out);
                    continue;
                }
                if HIDDEN_ELEMENTS.contains(&name) {
                    continue;
                }
                let block = BLOCK_ELEMENTS.contains(&name);
                if block {
                    break_line(out);
                }
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, out);
                }
                if block {
                    break_line(out);
                }
            }
            _ => {}
        }
    }
}

fn push_collapsed(out: &mut String, text: &str) {
    for c in text.chars() {
        if c.is_whitespace() && c != '\u{a0}' {
            if !(out.is_empty() || out.ends_with(' ') || out.ends_with('\n')) {
                out.push(' ');
            }
        } else {
            out.push(c);
        }
    }
}

fn break_line(out: &mut String) {
    while out.ends_with(' ') {
        out.pop();
    }
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}
