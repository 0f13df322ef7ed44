use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{Result, ZkError};
use crate::sections::extract_sections;
use crate::source::NoteSource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteContentInput {
    pub path: PathBuf,
    /// Level-2 headings to keep; everything when absent
    #[serde(default)]
    pub headings: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteContent {
    pub path: PathBuf,
    pub title: String,
    pub tags: Vec<String>,
    pub content: String,
    /// Outline of the whole note, independent of any narrowing
    pub headings: Vec<String>,
}

#[derive(Clone)]
pub struct GetNoteContent {
    source: Arc<dyn NoteSource>,
}

impl GetNoteContent {
    pub fn new(source: Arc<dyn NoteSource>) -> Self {
        Self { source }
    }

    pub fn handle(&self, input: &NoteContentInput) -> Result<NoteContent> {
        let note = self
            .source
            .note_with_content(&input.path)?
            .ok_or_else(|| {
                ZkError::NotFound(format!("Note not found at path: {}", input.path.display()))
            })?;

        let raw = note.content.unwrap_or_default();
        let extract = extract_sections(&raw, input.headings.as_deref());

        Ok(NoteContent {
            path: note.path,
            title: note.title,
            tags: note.tags,
            content: extract.content,
            headings: extract.headings,
        })
    }
}
