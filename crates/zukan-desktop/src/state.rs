//! Application state management
//!
//! Global state accessible via Dioxus context providers.

use std::sync::Arc;

use dioxus::prelude::*;

use zukan_core::auth::AuthSession;
use zukan_core::models::Note;

use crate::services::{AppServices, Synchronizer};

/// Global application state
#[derive(Clone, Copy)]
pub struct AppState {
    /// Published note list (replaced wholesale after every refresh)
    pub notes: Signal<Vec<Note>>,
    /// Active auth session, if signed in
    pub session: Signal<Option<AuthSession>>,
    /// Collaborator clients, once initialized
    pub services: Signal<Option<Arc<AppServices>>>,
    /// Session-scoped synchronizer, present while signed in
    pub synchronizer: Signal<Option<Arc<Synchronizer>>>,
    /// Last auth/initialization error for UI display
    pub auth_error: Signal<Option<String>>,
}

impl AppState {
    /// The session-scoped synchronizer, if any.
    #[must_use]
    pub fn synchronizer(&self) -> Option<Arc<Synchronizer>> {
        (self.synchronizer)()
    }

    /// Refresh the note list and republish it to the UI.
    ///
    /// Collaborator failures are logged and the previous list is kept,
    /// matching the log-and-continue policy of the rest of the app.
    pub async fn refresh_notes(&mut self) {
        let Some(sync) = self.synchronizer() else {
            return;
        };
        if let Err(error) = sync.refresh().await {
            tracing::error!("Failed to refresh notes: {error}");
        }
        self.notes.set(sync.notes().await);
    }
}
