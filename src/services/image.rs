use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};

use crate::config::ImageEncoding;

/// A captured photo ready to be sent for extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    data: Vec<u8>,
    mime_type: &'static str,
}

impl ImagePayload {
    /// Wrap raw image bytes, sniffing the MIME type from the magic bytes.
    pub fn new(data: Vec<u8>) -> Self {
        let mime_type = sniff_mime_type(&data);
        ImagePayload { data, mime_type }
    }

    pub fn mime_type(&self) -> &str {
        self.mime_type
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }

    /// Request body for the extraction endpoint
    pub fn request_body(&self, encoding: ImageEncoding) -> Value {
        let content = match encoding {
            // Matches the inline-data `Part` object of Vertex AI
            ImageEncoding::InlineData => json!({
                "inlineData": {
                    "data": self.to_base64(),
                    "mimeType": self.mime_type,
                }
            }),
            ImageEncoding::DataUrl => {
                Value::String(format!("data:{};base64,{}", self.mime_type, self.to_base64()))
            }
        };
        json!({ "imageContent": content })
    }
}

fn sniff_mime_type(data: &[u8]) -> &'static str {
    match data {
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [0x89, b'P', b'N', b'G', ..] => "image/png",
        [b'G', b'I', b'F', b'8', ..] => "image/gif",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image/webp",
        [_, _, _, _, b'f', b't', b'y', b'p', b'h', b'e', b'i', b'c', ..] => "image/heic",
        _ => "image/jpeg",
    }
}
