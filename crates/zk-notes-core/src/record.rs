//! Parsers for the `|`-delimited lines `zk` prints with our format templates.
//!
//! Titles are free text and may contain the delimiter, `zk` does not escape
//! it. Note lines are therefore split at the last delimiter (tags) and then at
//! the first one (path); whatever sits between is the title.

use crate::error::{Result, ZkError};
use crate::model::{Note, Tag};

pub const DELIMITER: char = '|';

/// Parse `path|title|tag1,tag2`.
///
/// Returns `None` for lines with fewer than two delimiters.
pub fn parse_note_line(line: &str) -> Option<Note> {
    let (rest, tags_part) = line.rsplit_once(DELIMITER)?;
    let (path, title) = rest.split_once(DELIMITER)?;

    let tags = if tags_part.is_empty() {
        Vec::new()
    } else {
        tags_part.split(',').map(str::to_string).collect()
    };

    Some(Note::new(path, title, tags))
}

/// Parse `name|count`.
///
/// A line without any delimiter yields `Ok(None)`. A count that is not an
/// integer is an error: `zk` always prints a number there.
pub fn parse_tag_line(line: &str) -> Result<Option<Tag>> {
    let Some((name, count)) = line.rsplit_once(DELIMITER) else {
        return Ok(None);
    };

    let note_count = count.trim().parse::<i64>().map_err(|source| ZkError::Parse {
        line: line.to_string(),
        source,
    })?;

    Ok(Some(Tag {
        name: name.to_string(),
        note_count,
    }))
}

/// Parse every note line, dropping the ones that do not fit the format.
pub fn parse_note_lines<S: AsRef<str>>(lines: &[S]) -> Vec<Note> {
    lines
        .iter()
        .filter_map(|line| {
            let line = line.as_ref();
            let note = parse_note_line(line);
            if note.is_none() {
                log::warn!("Skipping unparseable note record: {:?}", line);
            }
            note
        })
        .collect()
}

pub fn parse_tag_lines<S: AsRef<str>>(lines: &[S]) -> Result<Vec<Tag>> {
    let mut tags = Vec::with_capacity(lines.len());
    for line in lines {
        if let Some(tag) = parse_tag_line(line.as_ref())? {
            tags.push(tag);
        }
    }
    Ok(tags)
}
