use std::path::Path;

use crate::client::{Pick, ZkClient};
use crate::error::Result;
use crate::model::{Note, Tag};

/// Note query and command operations backed by the notebook tool
pub trait NoteSource: Send + Sync {
    fn notes(&self, filters: &[String]) -> Result<Vec<Note>>;
    fn tagless_notes(&self) -> Result<Vec<Note>>;
    fn note_with_content(&self, path: &Path) -> Result<Option<Note>>;
    fn pick_note(&self, pick: Pick) -> Result<Option<Note>>;
    fn create_note(&self, title: &str, path: &Path) -> Result<Note>;
}

pub trait TagSource: Send + Sync {
    fn tags(&self) -> Result<Vec<Tag>>;
}

impl NoteSource for ZkClient {
    fn notes(&self, filters: &[String]) -> Result<Vec<Note>> {
        ZkClient::notes(self, filters)
    }

    fn tagless_notes(&self) -> Result<Vec<Note>> {
        ZkClient::tagless_notes(self)
    }

    fn note_with_content(&self, path: &Path) -> Result<Option<Note>> {
        ZkClient::note_with_content(self, path)
    }

    fn pick_note(&self, pick: Pick) -> Result<Option<Note>> {
        ZkClient::pick_note(self, pick)
    }

    fn create_note(&self, title: &str, path: &Path) -> Result<Note> {
        ZkClient::create_note(self, title, path)
    }
}

impl TagSource for ZkClient {
    fn tags(&self) -> Result<Vec<Tag>> {
        ZkClient::tags(self)
    }
}
