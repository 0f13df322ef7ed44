use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A note as reported by `zk`. The path is the identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub path: PathBuf,
    pub title: String,
    pub tags: Vec<String>,
    /// Raw markdown, only filled in when explicitly fetched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Note {
    pub fn new(path: impl Into<PathBuf>, title: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            tags,
            content: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub note_count: i64,
}

/// Page metadata computed by [`crate::pagination::paginate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

/// How several filter patterns are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MatchMode {
    #[default]
    And,
    Or,
}

impl MatchMode {
    pub fn keyword(self) -> &'static str {
        match self {
            MatchMode::And => "AND",
            MatchMode::Or => "OR",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Link-graph relations `zk list` can filter on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkRelation {
    /// Notes the given note links to
    LinkTo,
    /// Notes linking to the given note
    LinkedBy,
    /// Unlinked notes sharing at least one link with the given note
    Related,
}

impl LinkRelation {
    pub fn flag(self) -> &'static str {
        match self {
            LinkRelation::LinkTo => "--link-to",
            LinkRelation::LinkedBy => "--linked-by",
            LinkRelation::Related => "--related",
        }
    }
}
