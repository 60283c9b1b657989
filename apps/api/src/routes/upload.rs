use axum::extract::Multipart;
use bytes::Bytes;

use crate::errors::AppError;

/// One file read from a multipart form.
#[derive(Debug)]
pub struct Upload {
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Reads the first field called `name`, skipping any others.
pub async fn read_upload(mut multipart: Multipart, name: &str) -> Result<Upload, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        if field.name() != Some(name) {
            continue;
        }
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        return Ok(Upload {
            content_type,
            bytes,
        });
    }

    Err(AppError::Validation(format!(
        "Multipart field '{name}' is missing"
    )))
}
