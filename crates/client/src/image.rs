//! Local image files for `create --image-file`.

use std::path::Path;

use guestbook_core::guest::{content_type_for_extension, encode_data_url};

use crate::error::{ClientError, Result};

/// Reads an image file and encodes it as a `data:` URL.
///
/// The MIME type is guessed from the extension; unknown extensions are sent
/// as `application/octet-stream`.
pub async fn read_image_file(path: &Path) -> Result<String> {
    let data = tokio::fs::read(path).await?;
    if data.is_empty() {
        return Err(ClientError::InvalidInput(format!(
            "{} is empty",
            path.display()
        )));
    }

    let content_type = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(content_type_for_extension)
        .unwrap_or("application/octet-stream");

    Ok(encode_data_url(content_type, &data))
}
