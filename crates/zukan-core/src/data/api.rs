//! HTTP client for the managed note API.

use serde::Deserialize;

use crate::models::{NewNote, Note, NoteId};
use crate::util::compact_text;
use crate::{Error, Result};

use super::NoteStore;

/// JSON client for note CRUD against the managed backend.
///
/// Operates under the signed-in session: every request carries the
/// session access token as a bearer credential.
#[derive(Debug, Clone)]
pub struct ApiNoteStore {
    base_url: String,
    access_token: String,
    client: reqwest::Client,
}

impl ApiNoteStore {
    /// Builds a client for an explicit API base URL and session token.
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        let base_url = normalize_base_url(base_url.into().as_str())?;
        let access_token = access_token.into();
        if access_token.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Access token must not be empty".to_string(),
            ));
        }
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            base_url,
            access_token,
            client,
        })
    }

    /// Returns the base URL this client was configured with.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn check_status(response: reqwest::Response, action: &str) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(Error::Data(format!(
            "{action} failed with HTTP {status}: {}",
            compact_text(&body)
        )))
    }
}

impl NoteStore for ApiNoteStore {
    async fn list(&self) -> Result<Vec<Note>> {
        let response = self
            .client
            .get(format!("{}/v1/notes", self.base_url))
            .bearer_auth(&self.access_token)
            .header("Accept", "application/json")
            .send()
            .await?;
        let response = Self::check_status(response, "Note list").await?;
        let payload = response.json::<NoteListResponse>().await?;
        Ok(payload.notes)
    }

    async fn create(&self, payload: NewNote) -> Result<Note> {
        let response = self
            .client
            .post(format!("{}/v1/notes", self.base_url))
            .bearer_auth(&self.access_token)
            .header("Accept", "application/json")
            .json(&payload)
            .send()
            .await?;
        let response = Self::check_status(response, "Note create").await?;
        Ok(response.json::<Note>().await?)
    }

    async fn delete(&self, id: &NoteId) -> Result<()> {
        let encoded_id = urlencoding::encode(id.as_str());
        let response = self
            .client
            .delete(format!("{}/v1/notes/{encoded_id}", self.base_url))
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        Self::check_status(response, "Note delete").await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct NoteListResponse {
    notes: Vec<Note>,
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let base = raw.trim().trim_end_matches('/').to_string();
    if base.is_empty() {
        return Err(Error::InvalidInput(
            "API base URL must not be empty".to_string(),
        ));
    }
    if !(base.starts_with("https://") || base.starts_with("http://")) {
        return Err(Error::InvalidInput(
            "API base URL must include http:// or https://".to_string(),
        ));
    }
    Ok(base)
}
