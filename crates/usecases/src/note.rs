//! Note attachment use cases.
//!
//! A note is owned through its parent's `note_id` back-reference. These use
//! cases are the only writers of that reference, which keeps invariant both
//! ways: a referenced note always exists, and an unreferenced note is
//! deleted rather than left orphaned.

use std::sync::Arc;

use shelfwise_core::{DomainError, DomainResult, Note, NoteId, NoteParent};
use shelfwise_repository::{LocationRepository, NoteRepository, ProductRepository};

/// Create or update the note attached to a parent.
pub struct SaveNote {
    notes: Arc<dyn NoteRepository>,
    products: Arc<dyn ProductRepository>,
    locations: Arc<dyn LocationRepository>,
}

impl SaveNote {
    pub fn new(
        notes: Arc<dyn NoteRepository>,
        products: Arc<dyn ProductRepository>,
        locations: Arc<dyn LocationRepository>,
    ) -> Self {
        Self {
            notes,
            products,
            locations,
        }
    }

    pub async fn execute(&self, parent: NoteParent, text: impl Into<String>) -> DomainResult<Note> {
        let text = text.into();
        match parent {
            NoteParent::Product(id) => {
                let Some(mut product) = self.products.get(id).await? else {
                    return Err(DomainError::not_found(format!("product {id}")));
                };
                let (note, created) = self.upsert(product.note_id, text).await?;
                if created {
                    product.note_id = Some(note.id);
                    self.products.update(product).await?;
                }
                Ok(note)
            }
            NoteParent::Location(id) => {
                let Some(mut location) = self.locations.get(id).await? else {
                    return Err(DomainError::not_found(format!("location {id}")));
                };
                let (note, created) = self.upsert(location.note_id, text).await?;
                if created {
                    location.note_id = Some(note.id);
                    self.locations.update(location).await?;
                }
                Ok(note)
            }
        }
    }

    /// Returns the note and whether it was newly created (meaning the
    /// parent's back-reference still needs to be written).
    async fn upsert(&self, existing: Option<NoteId>, text: String) -> DomainResult<(Note, bool)> {
        if let Some(note_id) = existing {
            if let Some(mut note) = self.notes.get(note_id).await? {
                note.text = text;
                self.notes.update(note.clone()).await?;
                return Ok((note, false));
            }
            // Dangling back-reference; fall through and recreate.
        }
        let note = self.notes.add(Note::new(text)).await?;
        Ok((note, true))
    }
}

/// Detach and delete the note attached to a parent. A parent without a note
/// (or a missing parent) is a benign no-op.
pub struct RemoveNote {
    notes: Arc<dyn NoteRepository>,
    products: Arc<dyn ProductRepository>,
    locations: Arc<dyn LocationRepository>,
}

impl RemoveNote {
    pub fn new(
        notes: Arc<dyn NoteRepository>,
        products: Arc<dyn ProductRepository>,
        locations: Arc<dyn LocationRepository>,
    ) -> Self {
        Self {
            notes,
            products,
            locations,
        }
    }

    pub async fn execute(&self, parent: NoteParent) -> DomainResult<()> {
        let note_id = match parent {
            NoteParent::Product(id) => {
                let Some(mut product) = self.products.get(id).await? else {
                    return Ok(());
                };
                let Some(note_id) = product.note_id.take() else {
                    return Ok(());
                };
                self.products.update(product).await?;
                note_id
            }
            NoteParent::Location(id) => {
                let Some(mut location) = self.locations.get(id).await? else {
                    return Ok(());
                };
                let Some(note_id) = location.note_id.take() else {
                    return Ok(());
                };
                self.locations.update(location).await?;
                note_id
            }
        };
        self.notes.remove(note_id).await
    }
}
