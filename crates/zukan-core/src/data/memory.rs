//! In-memory note store for tests and offline development.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use uuid::Uuid;

use crate::models::{NewNote, Note, NoteId};
use crate::{Error, Result};

use super::NoteStore;

/// Note store backed by process memory.
///
/// Mints uuid-v7 identifiers and preserves insertion order, matching
/// the managed backend's observable contract closely enough for tests.
#[derive(Debug, Default)]
pub struct MemoryNoteStore {
    notes: Mutex<Vec<Note>>,
    create_calls: AtomicUsize,
}

impl MemoryNoteStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of create calls that reached the store, including failed
    /// ones. Lets tests assert that local validation short-circuits.
    #[must_use]
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Note>>> {
        self.notes
            .lock()
            .map_err(|_| Error::Data("Note store lock poisoned".to_string()))
    }
}

impl NoteStore for MemoryNoteStore {
    async fn list(&self) -> Result<Vec<Note>> {
        Ok(self.lock()?.clone())
    }

    async fn create(&self, payload: NewNote) -> Result<Note> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        payload.validate()?;

        let note = Note {
            id: NoteId::new(Uuid::now_v7().to_string())?,
            name: payload.name,
            description: payload.description,
            image_key: payload.image_key,
            image_url: None,
        };
        self.lock()?.push(note.clone());
        Ok(note)
    }

    async fn delete(&self, id: &NoteId) -> Result<()> {
        let mut notes = self.lock()?;
        let before = notes.len();
        notes.retain(|note| &note.id != id);
        if notes.len() == before {
            return Err(Error::NotFound(id.to_string()));
        }
        Ok(())
    }
}
