//! JSON backup export and import.
//!
//! Import only checks that the payload is a JSON object, then replaces the document
//! wholesale. Field-level problems are absorbed by the lenient decoding in
//! `models::resume` rather than rejected here.

use chrono::{Local, NaiveDate};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::resume::ResumeDocument;
use crate::store::slots::StorageError;
use crate::store::DocumentStore;

pub const EXPORT_FILE_PREFIX: &str = "resume_backup_";
pub const EXPORT_MIME_TYPE: &str = "application/json";

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("file is not valid JSON: {0}")]
    Malformed(String),

    #[error("file does not contain a résumé object")]
    NotAnObject,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A downloadable backup.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub filename: String,
    pub mime_type: &'static str,
    pub body: String,
}

pub fn export_filename(date: NaiveDate) -> String {
    format!("{EXPORT_FILE_PREFIX}{}.json", date.format("%Y-%m-%d"))
}

/// Pretty-printed backup of `doc`, named after `date`.
pub fn build_export(doc: &ResumeDocument, date: NaiveDate) -> Result<ExportArtifact, StorageError> {
    Ok(ExportArtifact {
        filename: export_filename(date),
        mime_type: EXPORT_MIME_TYPE,
        body: serde_json::to_string_pretty(doc)?,
    })
}

/// Shallow structural check plus lenient decode. Does not touch the store.
pub fn parse_import(text: &str) -> Result<ResumeDocument, ImportError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ImportError::Malformed(e.to_string()))?;
    decode_document(value)
}

/// Accepts any JSON object as a document; arrays and scalars are rejected before serde
/// sees them. Missing or duplicate entry ids are reassigned.
pub fn decode_document(value: Value) -> Result<ResumeDocument, ImportError> {
    if !value.is_object() {
        return Err(ImportError::NotAnObject);
    }
    let mut doc: ResumeDocument =
        serde_json::from_value(value).map_err(|e| ImportError::Malformed(e.to_string()))?;

    let fixed = doc.ensure_entry_ids();
    if fixed > 0 {
        warn!("Incoming document had {fixed} missing or duplicate entry ids; reassigned");
    }
    Ok(doc)
}

impl DocumentStore {
    pub async fn export_document(&self) -> Result<ExportArtifact, StorageError> {
        let doc = self.snapshot().await;
        build_export(&doc, Local::now().date_naive())
    }

    /// Replaces the current document with the backup in `text`.
    /// On any error the current document is left as it was.
    pub async fn import_document(&self, text: &str) -> Result<ResumeDocument, ImportError> {
        let doc = parse_import(text)?;
        self.replace(doc.clone()).await?;
        info!("Imported résumé '{}'", doc.version_name);
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::store::slots::MemorySlotStore;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn test_export_filename_has_prefix_and_date() {
        assert_eq!(export_filename(date()), "resume_backup_2024-03-09.json");
    }

    #[test]
    fn test_export_is_pretty_json_of_full_document() {
        let mut doc = ResumeDocument::template();
        doc.name = "Ana".to_string();
        let artifact = build_export(&doc, date()).unwrap();
        assert_eq!(artifact.mime_type, "application/json");
        assert!(artifact.body.contains('\n'));
        let back: ResumeDocument = serde_json::from_str(&artifact.body).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_decode_document_rejects_arrays_and_scalars() {
        for value in [json!([]), json!(["x", "Ana"]), json!(null), json!("Ana")] {
            assert!(
                matches!(decode_document(value.clone()), Err(ImportError::NotAnObject)),
                "{value} should be rejected"
            );
        }
        assert_eq!(decode_document(json!({})).unwrap().name, "");
    }

    #[test]
    fn test_parse_import_rejects_malformed_json() {
        assert!(matches!(
            parse_import("{oops"),
            Err(ImportError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_import_rejects_non_objects() {
        for text in ["null", "[]", "3", "\"resume\""] {
            assert!(
                matches!(parse_import(text), Err(ImportError::NotAnObject)),
                "{text} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_import_minimal_object_replaces_document() {
        let store = DocumentStore::with_document(
            Arc::new(MemorySlotStore::new()),
            ResumeDocument {
                summary: "old summary".to_string(),
                ..ResumeDocument::template()
            },
        );

        let imported = store.import_document(r#"{"name":"Ana"}"#).await.unwrap();
        assert_eq!(imported.name, "Ana");

        let current = store.snapshot().await;
        assert_eq!(current.name, "Ana");
        // Wholesale replacement, not a merge
        assert_eq!(current.summary, "");
        assert_eq!(current.version_name, "");
    }

    #[tokio::test]
    async fn test_failed_import_leaves_document_unchanged() {
        let original = ResumeDocument {
            name: "Keep Me".to_string(),
            ..ResumeDocument::template()
        };
        let store =
            DocumentStore::with_document(Arc::new(MemorySlotStore::new()), original.clone());

        assert!(store.import_document("not json at all").await.is_err());
        assert!(store.import_document("[1, 2, 3]").await.is_err());
        assert_eq!(store.snapshot().await, original);
    }

    #[tokio::test]
    async fn test_export_then_import_round_trips() {
        let mut doc = ResumeDocument::template();
        doc.skills = "Rust, Go".to_string();
        doc.photo_url = Some("data:image/png;base64,AAAA".to_string());
        let store = DocumentStore::with_document(Arc::new(MemorySlotStore::new()), doc.clone());

        let artifact = store.export_document().await.unwrap();
        store.reset().await.unwrap();
        store.import_document(&artifact.body).await.unwrap();
        assert_eq!(store.snapshot().await, doc);
    }
}
