//! Free-text notes attachable to products and locations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{LocationId, NoteId, ProductId};

/// A free-text note owned by exactly one parent at a time.
///
/// Ownership is a back-reference: the parent stores `note_id`. A note no
/// parent references is orphaned and gets deleted by the note use cases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Note {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: NoteId::UNASSIGNED,
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}

/// An entity capable of owning a note.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteParent {
    Product(ProductId),
    Location(LocationId),
}
