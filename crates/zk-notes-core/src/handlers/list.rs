use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{first_page, NotesPage};
use crate::error::Result;
use crate::model::MatchMode;
use crate::pagination::paginate;
use crate::source::NoteSource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListNotesInput {
    #[serde(default = "first_page")]
    pub page: i64,
    /// Falls back to the configured page size
    #[serde(default)]
    pub per_page: Option<i64>,
    #[serde(default)]
    pub title_patterns: Vec<String>,
    #[serde(default)]
    pub title_match_mode: MatchMode,
    #[serde(default)]
    pub search_patterns: Vec<String>,
    #[serde(default)]
    pub search_match_mode: MatchMode,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub tags_match_mode: MatchMode,
    #[serde(default)]
    pub created_after: Option<String>,
    #[serde(default)]
    pub modified_after: Option<String>,
}

impl Default for ListNotesInput {
    fn default() -> Self {
        Self {
            page: first_page(),
            per_page: None,
            title_patterns: Vec::new(),
            title_match_mode: MatchMode::And,
            search_patterns: Vec::new(),
            search_match_mode: MatchMode::And,
            tags: Vec::new(),
            tags_match_mode: MatchMode::And,
            created_after: None,
            modified_after: None,
        }
    }
}

/// Translate a listing request into `zk list` filter arguments.
///
/// Tags joined for AND use `", "`, tags joined for OR use a bare `OR`.
pub fn build_filters(input: &ListNotesInput) -> Vec<String> {
    let mut filters = Vec::new();

    if !input.title_patterns.is_empty() {
        let clauses: Vec<String> = input
            .title_patterns
            .iter()
            .map(|t| format!("title: {}", t))
            .collect();
        filters.push("--match".to_string());
        filters.push(clauses.join(format!(" {} ", input.title_match_mode).as_str()));
    }

    if !input.search_patterns.is_empty() {
        filters.push("--match".to_string());
        filters.push(
            input
                .search_patterns
                .join(format!(" {} ", input.search_match_mode).as_str()),
        );
    }

    if !input.tags.is_empty() {
        let separator = match input.tags_match_mode {
            MatchMode::And => ", ",
            MatchMode::Or => "OR",
        };
        filters.push("--tag".to_string());
        filters.push(input.tags.join(separator));
    }

    if let Some(date) = &input.created_after {
        filters.push("--created-after".to_string());
        filters.push(date.clone());
    }
    if let Some(date) = &input.modified_after {
        filters.push("--modified-after".to_string());
        filters.push(date.clone());
    }

    filters
}

#[derive(Clone)]
pub struct ListNotes {
    source: Arc<dyn NoteSource>,
    default_per_page: i64,
}

impl ListNotes {
    pub fn new(source: Arc<dyn NoteSource>, default_per_page: i64) -> Self {
        Self {
            source,
            default_per_page,
        }
    }

    pub fn handle(&self, input: &ListNotesInput) -> Result<NotesPage> {
        let notes = self.source.notes(&build_filters(input))?;
        let per_page = input.per_page.unwrap_or(self.default_per_page);
        let (notes, pagination) = paginate(notes, input.page, per_page);
        Ok(NotesPage { pagination, notes })
    }
}
