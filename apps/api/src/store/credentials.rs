use std::sync::{Arc, RwLock};

use serde::Serialize;
use tracing::{info, warn};

use crate::store::slots::{SlotStore, StorageError, API_KEY_SLOT};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialSource {
    User,
    Environment,
}

/// Reported to clients instead of the key itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CredentialStatus {
    pub configured: bool,
    pub source: Option<CredentialSource>,
}

/// The AI credential: a user-entered key persisted in its own slot, with an optional
/// process-level fallback from the environment.
pub struct CredentialStore {
    slots: Arc<dyn SlotStore>,
    user_key: RwLock<Option<String>>,
    env_fallback: Option<String>,
}

impl CredentialStore {
    pub async fn open(slots: Arc<dyn SlotStore>, env_fallback: Option<String>) -> Self {
        let user_key = match slots.read(API_KEY_SLOT).await {
            Ok(key) => key,
            Err(e) => {
                warn!("Could not read stored API key ({e}), continuing without it");
                None
            }
        };
        if non_blank(user_key.as_deref()).is_some() {
            info!("Loaded stored AI credential");
        }

        Self {
            slots,
            user_key: RwLock::new(user_key),
            env_fallback,
        }
    }

    /// Stores the user key. A blank key clears it, re-enabling the environment fallback.
    pub async fn set(&self, key: &str) -> Result<(), StorageError> {
        let key = key.trim().to_string();
        *self.user_key.write().unwrap_or_else(|e| e.into_inner()) = Some(key.clone());
        self.slots.write(API_KEY_SLOT, &key).await
    }

    /// The key to send with the next AI request, if any.
    pub fn effective(&self) -> Option<String> {
        let user_key = self.user_key.read().unwrap_or_else(|e| e.into_inner());
        non_blank(user_key.as_deref())
            .or_else(|| non_blank(self.env_fallback.as_deref()))
            .map(str::to_string)
    }

    pub fn status(&self) -> CredentialStatus {
        let user_key = self.user_key.read().unwrap_or_else(|e| e.into_inner());
        let source = if non_blank(user_key.as_deref()).is_some() {
            Some(CredentialSource::User)
        } else if non_blank(self.env_fallback.as_deref()).is_some() {
            Some(CredentialSource::Environment)
        } else {
            None
        };
        CredentialStatus {
            configured: source.is_some(),
            source,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::slots::MemorySlotStore;

    #[tokio::test]
    async fn test_unconfigured_without_any_key() {
        let creds = CredentialStore::open(Arc::new(MemorySlotStore::new()), None).await;
        assert_eq!(creds.effective(), None);
        assert!(!creds.status().configured);
    }

    #[tokio::test]
    async fn test_loads_stored_key() {
        let slots = MemorySlotStore::new().with_slot(API_KEY_SLOT, "stored-key");
        let creds = CredentialStore::open(Arc::new(slots), None).await;
        assert_eq!(creds.effective().as_deref(), Some("stored-key"));
        assert_eq!(creds.status().source, Some(CredentialSource::User));
    }

    #[tokio::test]
    async fn test_user_key_wins_over_environment() {
        let slots = Arc::new(MemorySlotStore::new());
        let creds = CredentialStore::open(slots.clone(), Some("env-key".to_string())).await;
        assert_eq!(creds.status().source, Some(CredentialSource::Environment));

        creds.set("  user-key ").await.unwrap();
        assert_eq!(creds.effective().as_deref(), Some("user-key"));
        assert_eq!(
            slots.read(API_KEY_SLOT).await.unwrap().as_deref(),
            Some("user-key")
        );
    }

    #[tokio::test]
    async fn test_blank_key_falls_back_to_environment() {
        let slots = MemorySlotStore::new().with_slot(API_KEY_SLOT, "old");
        let creds = CredentialStore::open(Arc::new(slots), Some("env-key".to_string())).await;
        creds.set("").await.unwrap();
        assert_eq!(creds.effective().as_deref(), Some("env-key"));
    }
}
