use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use super::{first_page, NotesPage};
use crate::error::Result;
use crate::model::LinkRelation;
use crate::pagination::paginate;
use crate::source::NoteSource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedNotesInput {
    pub path: PathBuf,
    #[serde(default = "first_page")]
    pub page: i64,
    #[serde(default)]
    pub per_page: Option<i64>,
}

/// Notes connected to one note through the link graph
#[derive(Clone)]
pub struct LinkedNotes {
    source: Arc<dyn NoteSource>,
    relation: LinkRelation,
    default_per_page: i64,
}

impl LinkedNotes {
    pub fn new(source: Arc<dyn NoteSource>, relation: LinkRelation, default_per_page: i64) -> Self {
        Self {
            source,
            relation,
            default_per_page,
        }
    }

    pub fn relation(&self) -> LinkRelation {
        self.relation
    }

    pub fn handle(&self, input: &LinkedNotesInput) -> Result<NotesPage> {
        let filters = vec![
            self.relation.flag().to_string(),
            input.path.to_string_lossy().into_owned(),
        ];
        let notes = self.source.notes(&filters)?;
        let per_page = input.per_page.unwrap_or(self.default_per_page);
        let (notes, pagination) = paginate(notes, input.page, per_page);
        Ok(NotesPage { pagination, notes })
    }
}
