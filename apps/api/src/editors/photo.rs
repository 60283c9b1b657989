//! Profile photo, embedded in the document as a base64 `data:` URI.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use crate::models::resume::ResumeDocument;

/// Upper bound on the raw image size. The whole document is rewritten on every edit.
pub const MAX_PHOTO_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Error, PartialEq)]
pub enum PhotoError {
    #[error("Photo file is empty")]
    Empty,

    #[error("Unsupported photo type '{0}', expected an image")]
    WrongFormat(String),

    #[error("Photo is too large: {0} bytes (max {MAX_PHOTO_BYTES})")]
    TooLarge(usize),
}

pub fn to_data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{mime_type};base64,{}", STANDARD.encode(bytes))
}

/// Checks an upload and encodes it, before the document lock is taken.
pub fn validated_data_uri(mime_type: &str, bytes: &[u8]) -> Result<String, PhotoError> {
    let mime_type = mime_type.trim().to_ascii_lowercase();
    if !mime_type.starts_with("image/") {
        return Err(PhotoError::WrongFormat(mime_type));
    }
    if bytes.is_empty() {
        return Err(PhotoError::Empty);
    }
    if bytes.len() > MAX_PHOTO_BYTES {
        return Err(PhotoError::TooLarge(bytes.len()));
    }
    Ok(to_data_uri(&mime_type, bytes))
}

pub fn set_photo(doc: &mut ResumeDocument, data_uri: String) {
    doc.photo_url = Some(data_uri);
}

pub fn clear_photo(doc: &mut ResumeDocument) {
    doc.photo_url = None;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri_format() {
        assert_eq!(to_data_uri("image/png", b"abc"), "data:image/png;base64,YWJj");
    }

    #[test]
    fn test_set_and_clear_photo() {
        let mut doc = ResumeDocument::template();
        let uri = validated_data_uri("image/jpeg", &[0xff, 0xd8, 0xff]).unwrap();
        set_photo(&mut doc, uri);
        assert!(doc
            .photo_url
            .as_deref()
            .unwrap()
            .starts_with("data:image/jpeg;base64,"));
        clear_photo(&mut doc);
        assert!(doc.photo_url.is_none());
    }

    #[test]
    fn test_rejects_non_images() {
        let err = validated_data_uri("application/pdf", b"%PDF").unwrap_err();
        assert_eq!(err, PhotoError::WrongFormat("application/pdf".to_string()));
    }

    #[test]
    fn test_rejects_empty_and_oversized() {
        assert_eq!(validated_data_uri("image/png", b""), Err(PhotoError::Empty));
        let big = vec![0u8; MAX_PHOTO_BYTES + 1];
        assert_eq!(
            validated_data_uri("image/png", &big),
            Err(PhotoError::TooLarge(MAX_PHOTO_BYTES + 1))
        );
    }
}
