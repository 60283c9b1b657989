//! Document Store — the single source of truth for the résumé being edited.
//!
//! Every mutation goes through [`DocumentStore::update`], which applies the patch under the
//! store lock and then writes the full document to the `current_resume` slot.

pub mod credentials;
pub mod handlers;
pub mod slots;
pub mod transfer;

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::models::resume::ResumeDocument;
use crate::store::slots::{SlotStore, StorageError, RESUME_SLOT};

/// What was found in the document slot at startup.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(ResumeDocument),
    /// Nothing stored yet.
    Missing,
    /// Stored text is not valid JSON, or not an object.
    Corrupt(String),
    /// The backend could not be read at all.
    Unreadable(StorageError),
}

/// Reads and classifies the persisted document. Never fails.
pub async fn load_document(slots: &dyn SlotStore) -> LoadOutcome {
    let raw = match slots.read(RESUME_SLOT).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return LoadOutcome::Missing,
        Err(e) => return LoadOutcome::Unreadable(e),
    };

    match serde_json::from_str::<serde_json::Value>(&raw) {
        Ok(value) if value.is_object() => match serde_json::from_value(value) {
            Ok(doc) => LoadOutcome::Loaded(doc),
            Err(e) => LoadOutcome::Corrupt(e.to_string()),
        },
        Ok(_) => LoadOutcome::Corrupt("stored document is not a JSON object".to_string()),
        Err(e) => LoadOutcome::Corrupt(e.to_string()),
    }
}

pub struct DocumentStore {
    slots: Arc<dyn SlotStore>,
    document: Mutex<ResumeDocument>,
}

impl DocumentStore {
    /// Loads the persisted document, falling back to the template on anything but a clean load.
    pub async fn open(slots: Arc<dyn SlotStore>) -> Self {
        let document = match load_document(slots.as_ref()).await {
            LoadOutcome::Loaded(mut doc) => {
                let fixed = doc.ensure_entry_ids();
                if fixed > 0 {
                    warn!("Assigned {fixed} missing entry ids in stored document");
                }
                info!("Loaded stored résumé '{}'", doc.version_name);
                doc
            }
            LoadOutcome::Missing => {
                info!("No stored résumé, starting from template");
                ResumeDocument::template()
            }
            LoadOutcome::Corrupt(reason) => {
                warn!("Stored résumé is corrupt ({reason}), starting from template");
                ResumeDocument::template()
            }
            LoadOutcome::Unreadable(e) => {
                warn!("Could not read stored résumé ({e}), starting from template");
                ResumeDocument::template()
            }
        };

        Self::with_document(slots, document)
    }

    pub fn with_document(slots: Arc<dyn SlotStore>, document: ResumeDocument) -> Self {
        Self {
            slots,
            document: Mutex::new(document),
        }
    }

    /// Name of the slot backend the document is persisted to.
    pub fn backend(&self) -> &'static str {
        self.slots.backend()
    }

    /// A copy of the current document.
    pub async fn snapshot(&self) -> ResumeDocument {
        self.document.lock().await.clone()
    }

    /// Applies `patch` to the document and persists the result.
    ///
    /// The edit stays applied in memory even if the write fails; the error is returned so the
    /// caller can tell the user their change is not yet saved.
    pub async fn update<F, R>(&self, patch: F) -> Result<R, StorageError>
    where
        F: FnOnce(&mut ResumeDocument) -> R,
    {
        let mut doc = self.document.lock().await;
        let result = patch(&mut *doc);
        let serialized = serde_json::to_string(&*doc)?;

        if let Err(e) = self.slots.write(RESUME_SLOT, &serialized).await {
            warn!("Failed to persist résumé to {} slot: {e}", self.slots.backend());
            return Err(e);
        }
        debug!("Persisted résumé ({} bytes)", serialized.len());
        Ok(result)
    }

    /// Replaces the whole document.
    pub async fn replace(&self, document: ResumeDocument) -> Result<(), StorageError> {
        self.update(move |doc| *doc = document).await
    }

    /// Resets to the blank template.
    pub async fn reset(&self) -> Result<(), StorageError> {
        self.replace(ResumeDocument::template()).await
    }
}
