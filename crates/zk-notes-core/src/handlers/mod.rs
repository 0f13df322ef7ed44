//! One handler per notebook operation, plus the root that wires them up.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::client::{Pick, ZkClient};
use crate::config::ZkConfig;
use crate::model::{LinkRelation, Note, Pagination};
use crate::source::{NoteSource, TagSource};

mod content;
mod create;
mod links;
mod list;
mod picks;
mod tags;


pub use content::{GetNoteContent, NoteContent, NoteContentInput};
pub use create::{CreateNote, CreateNoteInput};
pub use links::{LinkedNotes, LinkedNotesInput};
pub use list::{build_filters, ListNotes, ListNotesInput};
pub use picks::{PickNote, TaglessNotes};
pub use tags::{ListTags, TagList};

/// A page of notes with its metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotesPage {
    pub pagination: Pagination,
    pub notes: Vec<Note>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteList {
    pub notes: Vec<Note>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleNote {
    pub note: Note,
}

fn first_page() -> i64 {
    1
}

/// The full handler set, built once at startup
#[derive(Clone)]
pub struct Handlers {
    pub list_notes: ListNotes,
    pub note_content: GetNoteContent,
    pub link_to: LinkedNotes,
    pub linked_by: LinkedNotes,
    pub related: LinkedNotes,
    pub tagless: TaglessNotes,
    pub last_modified: PickNote,
    pub random: PickNote,
    pub create_note: CreateNote,
    pub tags: ListTags,
}

impl Handlers {
    pub fn new(config: &ZkConfig) -> Self {
        Self::from_client(Arc::new(ZkClient::new(config)), config.default_per_page)
    }

    pub fn from_client(client: Arc<ZkClient>, default_per_page: i64) -> Self {
        Self::from_sources(client.clone(), client, default_per_page)
    }

    pub fn from_sources(
        notes: Arc<dyn NoteSource>,
        tags: Arc<dyn TagSource>,
        default_per_page: i64,
    ) -> Self {
        Self {
            list_notes: ListNotes::new(notes.clone(), default_per_page),
            note_content: GetNoteContent::new(notes.clone()),
            link_to: LinkedNotes::new(notes.clone(), LinkRelation::LinkTo, default_per_page),
            linked_by: LinkedNotes::new(notes.clone(), LinkRelation::LinkedBy, default_per_page),
            related: LinkedNotes::new(notes.clone(), LinkRelation::Related, default_per_page),
            tagless: TaglessNotes::new(notes.clone()),
            last_modified: PickNote::new(notes.clone(), Pick::LastModified),
            random: PickNote::new(notes.clone(), Pick::Random),
            create_note: CreateNote::new(notes),
            tags: ListTags::new(tags),
        }
    }
}
