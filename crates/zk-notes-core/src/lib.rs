//! zk Notes Core Library
//!
//! Drives the external `zk` notebook tool and turns its line output into
//! typed notes, tags and pages. Holds no notebook state of its own.
//!

pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod pagination;
pub mod process;
pub mod record;
pub mod sections;
pub mod source;

pub use client::{Pick, ZkClient};
pub use config::ZkConfig;
pub use error::{Result, ZkError};
pub use handlers::Handlers;
pub use model::{LinkRelation, MatchMode, Note, Pagination, Tag};
pub use source::{NoteSource, TagSource};
