//! Data collaborator: document-style CRUD over note records.
//!
//! The store owns record identity; notes come back in the store's
//! return order and are never re-sorted locally.

mod api;
mod memory;

pub use api::ApiNoteStore;
pub use memory::MemoryNoteStore;

use crate::models::{NewNote, Note, NoteId};
use crate::Result;

/// Trait for note persistence operations.
pub trait NoteStore {
    /// List all notes in store order.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<Note>>> + Send;

    /// Create a note, returning the stored record with its assigned id.
    fn create(&self, payload: NewNote) -> impl std::future::Future<Output = Result<Note>> + Send;

    /// Delete a note by id.
    fn delete(&self, id: &NoteId) -> impl std::future::Future<Output = Result<()>> + Send;
}
