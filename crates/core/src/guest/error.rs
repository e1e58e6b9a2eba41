use thiserror::Error;

/// Errors raised while validating create input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Guest name is required")]
    MissingName,
    #[error("Guest image is required")]
    MissingImage,
}

/// Errors raised while decoding an inline image payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("Malformed data URL: missing ',' separator")]
    MissingSeparator,
    #[error("Unsupported data URL encoding: only base64 payloads are accepted")]
    NotBase64,
    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(String),
    #[error("Unsupported content type: {0}")]
    NotAnImage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        assert_eq!(
            ValidationError::MissingName.to_string(),
            "Guest name is required"
        );
        assert_eq!(
            ValidationError::MissingImage.to_string(),
            "Guest image is required"
        );
    }

    #[test]
    fn test_image_error_display() {
        assert_eq!(
            ImageError::InvalidBase64("bad byte".to_string()).to_string(),
            "Invalid base64 payload: bad byte"
        );
        assert_eq!(
            ImageError::NotAnImage("text/html".to_string()).to_string(),
            "Unsupported content type: text/html"
        );
    }
}
