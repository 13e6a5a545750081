//! Note synchronization: list/create/delete against the collaborators.
//!
//! The published list is a disposable projection of the data store. It
//! is only ever replaced wholesale by a completed refresh, never
//! patched in place. Overlapping refreshes are coordinated with a
//! generation counter so the most recently started refresh wins and a
//! stale completion can never overwrite a newer list.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::RwLock;

use crate::data::NoteStore;
use crate::models::{NewNote, Note, NoteId, Preset, PRESETS};
use crate::storage::MediaStore;
use crate::util::file_name_from_address;
use crate::{Error, Result};

/// What to do when the record write succeeds but the image upload fails.
///
/// The two writes span two external systems and are not transactional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PartialFailurePolicy {
    /// Keep the record; its image reference will never resolve.
    #[default]
    KeepRecord,
    /// Compensate by deleting the just-created record.
    DeleteRecord,
}

/// An image to upload alongside a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Literal file name; becomes the note's `image_key`.
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

#[derive(Debug, Default)]
struct Published {
    generation: u64,
    notes: Vec<Note>,
}

/// Synchronizes the local note projection with the data and storage
/// collaborators for one signed-in identity.
#[derive(Debug)]
pub struct NoteSynchronizer<D: NoteStore, S: MediaStore> {
    data: Arc<D>,
    media: Arc<S>,
    identity: String,
    policy: PartialFailurePolicy,
    published: RwLock<Published>,
    refresh_generation: AtomicU64,
}

impl<D: NoteStore, S: MediaStore> NoteSynchronizer<D, S> {
    pub fn new(
        data: Arc<D>,
        media: Arc<S>,
        identity: impl Into<String>,
        policy: PartialFailurePolicy,
    ) -> Result<Self> {
        let identity = identity.into();
        if identity.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Owner identity must not be empty".to_string(),
            ));
        }
        Ok(Self {
            data,
            media,
            identity,
            policy,
            published: RwLock::new(Published::default()),
            refresh_generation: AtomicU64::new(0),
        })
    }

    /// Owner identity this synchronizer is scoped to.
    #[must_use]
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Snapshot of the currently published list.
    pub async fn notes(&self) -> Vec<Note> {
        self.published.read().await.notes.clone()
    }

    /// Re-fetch the full note list and resolve image addresses.
    ///
    /// Image resolution fans out over all notes at once and is awaited
    /// together; a failing resolution for one note logs and leaves that
    /// note without a displayable address rather than failing the whole
    /// publication. The refreshed list is published only if no newer
    /// refresh started in the meantime.
    pub async fn refresh(&self) -> Result<Vec<Note>> {
        let generation = self.refresh_generation.fetch_add(1, Ordering::SeqCst) + 1;

        let notes = self.data.list().await?;
        let notes = join_all(notes.into_iter().map(|note| self.resolve_note(note))).await;

        let mut published = self.published.write().await;
        if generation > published.generation {
            published.generation = generation;
            published.notes.clone_from(&notes);
        } else {
            tracing::debug!(
                generation,
                published_generation = published.generation,
                "Discarding stale refresh result"
            );
        }
        Ok(notes)
    }

    /// Create a note, optionally uploading an image, then refresh.
    ///
    /// Validation failures reject locally without any collaborator
    /// call. The record is written first; the upload follows, governed
    /// by the configured [`PartialFailurePolicy`] on failure.
    pub async fn create(
        &self,
        name: &str,
        description: &str,
        image: Option<ImageUpload>,
    ) -> Result<Note> {
        // The storage key is the literal file name component of the
        // image address, so a refresh can re-derive the same object.
        let image_key = match &image {
            Some(image) => Some(file_name_from_address(&image.file_name).ok_or_else(|| {
                Error::InvalidInput("Image file name must not be empty".to_string())
            })?),
            None => None,
        };

        let payload = NewNote::new(name.trim(), description.trim(), image_key.clone());
        payload.validate()?;

        let note = self.data.create(payload).await?;

        if let (Some(image), Some(key)) = (image, image_key) {
            self.upload_or_compensate(&note, &key, &image).await?;
        }

        self.refresh().await?;
        Ok(note)
    }

    /// Delete a note by id, then refresh.
    ///
    /// The associated stored binary is deliberately left behind; the
    /// store owns no reverse index from objects to records.
    pub async fn remove(&self, id: &NoteId) -> Result<()> {
        let deleted = self.data.delete(id).await;
        self.refresh().await?;
        deleted
    }

    /// Register the preset at `index` as a persisted note.
    ///
    /// Uses the preset's literal file name as the storage key and
    /// uploads the embedded image bytes after the record write, under
    /// the same partial-failure policy as [`NoteSynchronizer::create`].
    pub async fn register_preset(&self, index: usize) -> Result<Note> {
        let preset: &Preset = PRESETS.get(index).ok_or_else(|| {
            Error::InvalidInput(format!("No preset at index {index}"))
        })?;

        self.create(
            preset.name,
            preset.kind,
            Some(ImageUpload {
                file_name: preset.file_name.to_string(),
                bytes: preset.image.to_vec(),
                content_type: Some(preset.content_type.to_string()),
            }),
        )
        .await
    }

    async fn resolve_note(&self, mut note: Note) -> Note {
        note.image_url = None;
        if let Some(key) = note.image_key.clone() {
            match self.media.resolve_url(&self.identity, &key).await {
                Ok(url) => note.image_url = Some(url),
                Err(error) => {
                    tracing::warn!(
                        note_id = %note.id,
                        image_key = %key,
                        "Failed to resolve image address: {error}"
                    );
                }
            }
        }
        note
    }

    async fn upload_or_compensate(
        &self,
        note: &Note,
        key: &str,
        image: &ImageUpload,
    ) -> Result<()> {
        let upload = self
            .media
            .upload(&self.identity, key, &image.bytes, image.content_type.as_deref())
            .await;

        let Err(error) = upload else {
            return Ok(());
        };

        match self.policy {
            PartialFailurePolicy::KeepRecord => {
                tracing::error!(
                    note_id = %note.id,
                    "Image upload failed; keeping record with dangling reference: {error}"
                );
            }
            PartialFailurePolicy::DeleteRecord => {
                tracing::error!(
                    note_id = %note.id,
                    "Image upload failed; deleting the just-created record: {error}"
                );
                if let Err(delete_error) = self.data.delete(&note.id).await {
                    tracing::error!(
                        note_id = %note.id,
                        "Compensating delete failed: {delete_error}"
                    );
                }
            }
        }
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data::MemoryNoteStore;
    use crate::storage::MemoryMediaStore;

    const IDENTITY: &str = "identity-1";

    fn synchronizer(
        policy: PartialFailurePolicy,
    ) -> (
        Arc<MemoryNoteStore>,
        Arc<MemoryMediaStore>,
        NoteSynchronizer<MemoryNoteStore, MemoryMediaStore>,
    ) {
        let data = Arc::new(MemoryNoteStore::new());
        let media = Arc::new(MemoryMediaStore::new());
        let sync =
            NoteSynchronizer::new(Arc::clone(&data), Arc::clone(&media), IDENTITY, policy)
                .unwrap();
        (data, media, sync)
    }

    #[test]
    fn rejects_empty_identity() {
        let data = Arc::new(MemoryNoteStore::new());
        let media = Arc::new(MemoryMediaStore::new());
        assert!(
            NoteSynchronizer::new(data, media, "  ", PartialFailurePolicy::default()).is_err()
        );
    }

    #[tokio::test]
    async fn create_without_image_publishes_note() {
        let (_, _, sync) = synchronizer(PartialFailurePolicy::default());

        let created = sync.create("Ponita", "fire", None).await.unwrap();
        assert_eq!(created.name, "Ponita");
        assert!(created.image_key.is_none());

        let notes = sync.notes().await;
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, created.id);
        assert!(notes[0].image_url.is_none());
    }

    #[tokio::test]
    async fn validation_failure_never_reaches_the_store() {
        let (data, _, sync) = synchronizer(PartialFailurePolicy::default());

        assert!(sync.create("", "fire", None).await.is_err());
        assert!(sync.create("Ponita", "   ", None).await.is_err());
        assert_eq!(data.create_calls(), 0);
        assert!(sync.notes().await.is_empty());
    }

    #[tokio::test]
    async fn create_with_image_resolves_address_on_refresh() {
        let (_, media, sync) = synchronizer(PartialFailurePolicy::default());

        let created = sync
            .create(
                "Ponita",
                "fire",
                Some(ImageUpload {
                    file_name: "ponita0077.svg".to_string(),
                    bytes: b"svg".to_vec(),
                    content_type: Some("image/svg+xml".to_string()),
                }),
            )
            .await
            .unwrap();
        assert_eq!(created.image_key.as_deref(), Some("ponita0077.svg"));
        assert!(media.contains(IDENTITY, "ponita0077.svg"));

        let notes = sync.notes().await;
        assert_eq!(
            notes[0].image_url.as_deref(),
            Some("memory://media/identity-1/ponita0077.svg")
        );
    }

    #[tokio::test]
    async fn create_reduces_image_address_to_file_name() {
        let (_, media, sync) = synchronizer(PartialFailurePolicy::default());

        let created = sync
            .create(
                "Ponita",
                "fire",
                Some(ImageUpload {
                    file_name: "pic/ponita0077.svg".to_string(),
                    bytes: b"svg".to_vec(),
                    content_type: None,
                }),
            )
            .await
            .unwrap();
        assert_eq!(created.image_key.as_deref(), Some("ponita0077.svg"));
        assert!(media.contains(IDENTITY, "ponita0077.svg"));
    }

    #[tokio::test]
    async fn keep_record_policy_leaves_dangling_reference() {
        let (data, media, sync) = synchronizer(PartialFailurePolicy::KeepRecord);
        media.fail_uploads(true);

        let result = sync
            .create(
                "Ponita",
                "fire",
                Some(ImageUpload {
                    file_name: "ponita0077.svg".to_string(),
                    bytes: b"svg".to_vec(),
                    content_type: None,
                }),
            )
            .await;
        assert!(result.is_err());

        // Record survives with a key that will never resolve.
        let stored = data.list().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].image_key.as_deref(), Some("ponita0077.svg"));
        assert!(!media.contains(IDENTITY, "ponita0077.svg"));

        sync.refresh().await.unwrap();
        let notes = sync.notes().await;
        assert!(notes[0].image_url.is_none());
    }

    #[tokio::test]
    async fn delete_record_policy_compensates_on_upload_failure() {
        let (data, media, sync) = synchronizer(PartialFailurePolicy::DeleteRecord);
        media.fail_uploads(true);

        let result = sync
            .create(
                "Ponita",
                "fire",
                Some(ImageUpload {
                    file_name: "ponita0077.svg".to_string(),
                    bytes: b"svg".to_vec(),
                    content_type: None,
                }),
            )
            .await;
        assert!(result.is_err());
        assert!(data.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn remove_drops_note_from_subsequent_refreshes() {
        let (_, _, sync) = synchronizer(PartialFailurePolicy::default());

        let keep = sync.create("Usokki", "rock", None).await.unwrap();
        let gone = sync.create("Ponita", "fire", None).await.unwrap();

        sync.remove(&gone.id).await.unwrap();
        let notes = sync.notes().await;
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, keep.id);

        let refreshed = sync.refresh().await.unwrap();
        assert!(refreshed.iter().all(|note| note.id != gone.id));
    }

    #[tokio::test]
    async fn register_preset_copies_name_type_and_key() {
        let (_, media, sync) = synchronizer(PartialFailurePolicy::default());

        for (index, preset) in PRESETS.iter().enumerate() {
            let note = sync.register_preset(index).await.unwrap();
            assert_eq!(note.name, preset.name);
            assert_eq!(note.description, preset.kind);
            assert_eq!(note.image_key.as_deref(), Some(preset.file_name));
            assert!(media.contains(IDENTITY, preset.file_name));
        }

        assert!(sync.register_preset(PRESETS.len()).await.is_err());
    }

    #[tokio::test]
    async fn refresh_is_idempotent_without_mutations() {
        let (_, _, sync) = synchronizer(PartialFailurePolicy::default());
        sync.create("Usokki", "rock", None).await.unwrap();
        sync.create("Ponita", "fire", None).await.unwrap();

        let first = sync.refresh().await.unwrap();
        let second = sync.refresh().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(sync.notes().await, second);
    }

    /// Store wrapper that delays list calls, for interleaving tests.
    struct SlowListStore {
        inner: Arc<MemoryNoteStore>,
        delay: std::sync::Mutex<Duration>,
    }

    impl SlowListStore {
        fn set_delay(&self, delay: Duration) {
            *self.delay.lock().unwrap() = delay;
        }
    }

    impl NoteStore for SlowListStore {
        async fn list(&self) -> crate::Result<Vec<Note>> {
            let delay = *self.delay.lock().unwrap();
            tokio::time::sleep(delay).await;
            self.inner.list().await
        }

        async fn create(&self, payload: NewNote) -> crate::Result<Note> {
            self.inner.create(payload).await
        }

        async fn delete(&self, id: &NoteId) -> crate::Result<()> {
            self.inner.delete(id).await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn stale_refresh_cannot_overwrite_newer_publication() {
        let inner = Arc::new(MemoryNoteStore::new());
        inner
            .create(NewNote::new("Usokki", "rock", None))
            .await
            .unwrap();

        let data = Arc::new(SlowListStore {
            inner: Arc::clone(&inner),
            delay: std::sync::Mutex::new(Duration::from_millis(500)),
        });
        let media = Arc::new(MemoryMediaStore::new());
        let sync = Arc::new(
            NoteSynchronizer::new(
                Arc::clone(&data),
                media,
                IDENTITY,
                PartialFailurePolicy::default(),
            )
            .unwrap(),
        );

        // Slow refresh starts first and sees only the original note.
        let slow = tokio::spawn({
            let sync = Arc::clone(&sync);
            async move { sync.refresh().await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;

        // A mutation lands and a fast refresh starts afterwards.
        inner
            .create(NewNote::new("Ponita", "fire", None))
            .await
            .unwrap();
        data.set_delay(Duration::from_millis(10));
        sync.refresh().await.unwrap();
        assert_eq!(sync.notes().await.len(), 2);

        // The slow refresh completes late with one note; it must not
        // clobber the newer two-note publication.
        slow.await.unwrap().unwrap();
        assert_eq!(sync.notes().await.len(), 2);
    }
}
