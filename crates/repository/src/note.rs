use async_trait::async_trait;

use shelfwise_core::{DomainResult, Note, NoteId};

/// Data access for [`Note`] rows. Ownership lives on the parent
/// (`note_id` back-reference); the note use cases keep both sides in step.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    async fn get(&self, id: NoteId) -> DomainResult<Option<Note>>;

    async fn add(&self, note: Note) -> DomainResult<Note>;

    async fn update(&self, note: Note) -> DomainResult<()>;

    async fn remove(&self, id: NoteId) -> DomainResult<()>;
}
