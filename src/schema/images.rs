//! The `image` field of schema.org recipes comes in four shapes. Each shape
//! has its own parser; they are tried in order and the first structural
//! match wins.

use log::debug;
use serde_json::Value;

type ImageShape = fn(&Value) -> Option<Vec<String>>;

/// Candidate parsers in the order they are attempted
const IMAGE_SHAPES: [(&str, ImageShape); 4] = [
    ("url list", url_list),
    ("image object list", image_object_list),
    ("single url", single_url),
    ("single image object", single_image_object),
];

/// Resolve an `image` value to an ordered list of URLs.
///
/// Returns `None` when the value matches none of the known shapes, or is a
/// single image object carrying no URL.
pub fn decode_images(value: &Value) -> Option<Vec<String>> {
    for (shape, parse) in IMAGE_SHAPES {
        if let Some(images) = parse(value) {
            debug!("image field matched shape: {}", shape);
            return Some(images);
        }
    }
    debug!("image field matched no known shape");
    None
}

/// `["https://...", ...]`; every element must be a string.
fn url_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|item| item.as_str().map(String::from))
        .collect()
}

/// `[{"url": ...}, {"contentUrl": ...}, ...]`; every element must be an
/// object, objects without a URL are dropped.
fn image_object_list(value: &Value) -> Option<Vec<String>> {
    let items = value.as_array()?;
    if !items.iter().all(Value::is_object) {
        return None;
    }
    Some(items.iter().filter_map(object_url).collect())
}

fn single_url(value: &Value) -> Option<Vec<String>> {
    value.as_str().map(|url| vec![url.to_string()])
}

fn single_image_object(value: &Value) -> Option<Vec<String>> {
    if !value.is_object() {
        return None;
    }
    object_url(value).map(|url| vec![url])
}

/// `url`, else `contentUrl`. A `url` that is not a string is ignored rather
/// than rejecting the object, so `contentUrl` still gets a chance.
fn object_url(value: &Value) -> Option<String> {
    value
        .get("url")
        .and_then(Value::as_str)
        .or_else(|| value.get("contentUrl").and_then(Value::as_str))
        .map(String::from)
}
