use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use super::SingleNote;
use crate::error::Result;
use crate::source::NoteSource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateNoteInput {
    pub title: String,
    /// Directory or file path handed to `zk new`
    pub path: PathBuf,
}

#[derive(Clone)]
pub struct CreateNote {
    source: Arc<dyn NoteSource>,
}

impl CreateNote {
    pub fn new(source: Arc<dyn NoteSource>) -> Self {
        Self { source }
    }

    pub fn handle(&self, input: &CreateNoteInput) -> Result<SingleNote> {
        let note = self.source.create_note(&input.title, &input.path)?;
        log::info!("Created note {:?}", note.path);
        Ok(SingleNote { note })
    }
}
