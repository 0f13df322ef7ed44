use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::Result;
use crate::model::Tag;
use crate::source::TagSource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagList {
    pub tags: Vec<Tag>,
}

#[derive(Clone)]
pub struct ListTags {
    source: Arc<dyn TagSource>,
}

impl ListTags {
    pub fn new(source: Arc<dyn TagSource>) -> Self {
        Self { source }
    }

    pub fn handle(&self) -> Result<TagList> {
        Ok(TagList {
            tags: self.source.tags()?,
        })
    }
}
