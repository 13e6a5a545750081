//! Note model

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Opaque identifier for a persisted note.
///
/// Identity is owned by the data collaborator: the id is assigned on
/// create and never minted locally by application logic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Wrap a collaborator-assigned identifier.
    ///
    /// Returns an error when the raw value is empty.
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Note id cannot be empty".to_string(),
            ));
        }
        Ok(Self(raw))
    }

    /// Get the string representation of this id
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted Pokémon entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Collaborator-assigned identifier
    pub id: NoteId,
    /// Pokémon name
    pub name: String,
    /// Pokémon type
    pub description: String,
    /// Storage-relative image name, when an image was registered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_key: Option<String>,
    /// Resolved displayable address for the image.
    ///
    /// Derived on every refresh from `(owner identity, image_key)` and
    /// never persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Payload for creating a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNote {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_key: Option<String>,
}

impl NewNote {
    /// Build a creation payload from raw form values.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        image_key: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            image_key,
        }
    }

    /// Validate required fields before any collaborator call.
    ///
    /// Name and description must be non-empty after trimming; an absent
    /// image is allowed, an empty image key is not.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Pokémon name is required".to_string(),
            ));
        }
        if self.description.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Pokémon type is required".to_string(),
            ));
        }
        if let Some(key) = &self.image_key {
            if key.trim().is_empty() {
                return Err(Error::InvalidInput(
                    "Image name cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_id_rejects_empty() {
        assert!(NoteId::new("").is_err());
        assert!(NoteId::new("   ").is_err());
    }

    #[test]
    fn note_id_roundtrips_display() {
        let id = NoteId::new("note-123").unwrap();
        assert_eq!(id.to_string(), "note-123");
        assert_eq!(id.as_str(), "note-123");
    }

    #[test]
    fn validate_accepts_complete_payload() {
        let payload = NewNote::new("Ponita", "fire", Some("ponita0077.svg".to_string()));
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn validate_accepts_missing_image() {
        let payload = NewNote::new("Ponita", "fire", None);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_name() {
        let payload = NewNote::new("   ", "fire", None);
        assert!(matches!(
            payload.validate(),
            Err(Error::InvalidInput(message)) if message.contains("name")
        ));
    }

    #[test]
    fn validate_rejects_blank_description() {
        let payload = NewNote::new("Ponita", "", None);
        assert!(matches!(
            payload.validate(),
            Err(Error::InvalidInput(message)) if message.contains("type")
        ));
    }

    #[test]
    fn validate_rejects_empty_image_key() {
        let payload = NewNote::new("Ponita", "fire", Some("  ".to_string()));
        assert!(payload.validate().is_err());
    }
}
