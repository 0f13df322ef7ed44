use std::sync::Arc;

use super::{NoteList, SingleNote};
use crate::client::Pick;
use crate::error::{Result, ZkError};
use crate::source::NoteSource;

#[derive(Clone)]
pub struct TaglessNotes {
    source: Arc<dyn NoteSource>,
}

impl TaglessNotes {
    pub fn new(source: Arc<dyn NoteSource>) -> Self {
        Self { source }
    }

    pub fn handle(&self) -> Result<NoteList> {
        Ok(NoteList {
            notes: self.source.tagless_notes()?,
        })
    }
}

/// Single note chosen by `zk`'s sort order (last modified, random)
#[derive(Clone)]
pub struct PickNote {
    source: Arc<dyn NoteSource>,
    pick: Pick,
}

impl PickNote {
    pub fn new(source: Arc<dyn NoteSource>, pick: Pick) -> Self {
        Self { source, pick }
    }

    pub fn handle(&self) -> Result<SingleNote> {
        let note = self.source.pick_note(self.pick)?.ok_or_else(|| {
            ZkError::NotFound(match self.pick {
                Pick::LastModified => "Last modified note not found".to_string(),
                Pick::Random => "Random note not found".to_string(),
            })
        })?;
        Ok(SingleNote { note })
    }
}
