//! Guest image payloads.
//!
//! A guest image is stored as a single string. Uploads from the admin page
//! arrive as `data:<mime>;base64,<bytes>` URLs; stores that keep image bytes
//! out of band replace them with a plain URL.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use super::error::ImageError;

const DATA_URL_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64";
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Parsed form of a guest image string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePayload {
    /// Decoded bytes of an inline `data:` URL.
    Inline { content_type: String, data: Vec<u8> },
    /// Anything that is not a `data:` URL is treated as a link to hosted bytes.
    Reference(String),
}

/// Returns true if the image string is an inline `data:` URL.
pub fn is_inline_image(image: &str) -> bool {
    image
        .get(..DATA_URL_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(DATA_URL_PREFIX))
}

/// Returns true for `image/*` media types.
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type
        .split_once('/')
        .is_some_and(|(kind, subtype)| kind.eq_ignore_ascii_case("image") && !subtype.is_empty())
}

/// Parses an image string, decoding inline payloads.
pub fn parse_image(image: &str) -> Result<ImagePayload, ImageError> {
    if !is_inline_image(image) {
        return Ok(ImagePayload::Reference(image.to_string()));
    }

    let rest = &image[DATA_URL_PREFIX.len()..];
    let (header, payload) = rest.split_once(',').ok_or(ImageError::MissingSeparator)?;

    let media = header
        .strip_suffix(BASE64_MARKER)
        .ok_or(ImageError::NotBase64)?;

    // Media type parameters such as `;charset=` are dropped.
    let content_type = match media.split(';').next().map(str::trim) {
        Some(mime) if !mime.is_empty() => mime.to_ascii_lowercase(),
        _ => DEFAULT_CONTENT_TYPE.to_string(),
    };

    let data = STANDARD
        .decode(payload.trim())
        .map_err(|e| ImageError::InvalidBase64(e.to_string()))?;

    Ok(ImagePayload::Inline { content_type, data })
}

/// Encodes raw bytes as a `data:` URL.
pub fn encode_data_url(content_type: &str, data: &[u8]) -> String {
    format!(
        "{DATA_URL_PREFIX}{content_type}{BASE64_MARKER},{}",
        STANDARD.encode(data)
    )
}

/// Best-effort MIME type for a file extension (case-insensitive).
pub fn content_type_for_extension(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "svg" => "image/svg+xml",
        "heic" => "image/heic",
        _ => DEFAULT_CONTENT_TYPE,
    }
}
