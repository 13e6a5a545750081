//! Data models for Zukan

mod note;
mod preset;

pub use note::{NewNote, Note, NoteId};
pub use preset::{Preset, PRESETS};
