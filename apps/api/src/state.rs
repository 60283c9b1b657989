use std::sync::{Arc, Mutex, MutexGuard};

use crate::ai::AiGateway;
use crate::analytics::MetricsSource;
use crate::config::Config;
use crate::shell::{InFlightFlag, ShellState};
use crate::store::credentials::CredentialStore;
use crate::store::DocumentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DocumentStore>,
    pub credentials: Arc<CredentialStore>,
    /// Never locked across an `.await`.
    pub shell: Arc<Mutex<ShellState>>,
    pub ai: AiGateway,
    pub rewrite_flag: Arc<InFlightFlag>,
    pub ats_flag: Arc<InFlightFlag>,
    /// Pluggable metrics source. Default: the built-in sample set.
    pub metrics: Arc<dyn MetricsSource>,
    pub config: Config,
}

impl AppState {
    pub fn shell(&self) -> MutexGuard<'_, ShellState> {
        self.shell.lock().unwrap_or_else(|e| e.into_inner())
    }
}
