//! zukan-core - Core library for Zukan
//!
//! This crate contains the models, collaborator clients (data store,
//! object storage, auth), the carousel controller, and the note
//! synchronization logic shared by all Zukan interfaces.

pub mod auth;
pub mod carousel;
pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod storage;
pub mod sync;
pub mod util;

pub use error::{Error, Result};
pub use models::{Note, NoteId};
