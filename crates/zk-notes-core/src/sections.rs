//! Heading outline and section extraction for note bodies.
//!
//! A note is read as a flat run of top-level markdown blocks. A section starts
//! at a level-2 heading and runs up to the next level-1 or level-2 heading;
//! deeper headings stay inside it. Extracted sections are written back out
//! block by block: headings are re-emitted in ATX form, every other block is
//! copied from its source span, and blocks are separated by one blank line.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use serde::{Deserialize, Serialize};
use std::ops::Range;

const SECTION_LEVEL: u8 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionExtract {
    pub content: String,
    /// Level-2 heading texts of the whole note, in document order
    pub headings: Vec<String>,
}

#[derive(Debug)]
enum BlockKind {
    Heading {
        level: u8,
        text: String,
        inline: Option<Range<usize>>,
    },
    Other,
}

#[derive(Debug)]
struct Block {
    kind: BlockKind,
    range: Range<usize>,
}

impl Block {
    fn heading_level(&self) -> Option<u8> {
        match self.kind {
            BlockKind::Heading { level, .. } => Some(level),
            BlockKind::Other => None,
        }
    }

    fn section_title(&self) -> Option<&str> {
        match &self.kind {
            BlockKind::Heading { level, text, .. } if *level == SECTION_LEVEL => {
                Some(text.as_str())
            }
            _ => None,
        }
    }

    fn to_markdown(&self, source: &str) -> String {
        match &self.kind {
            BlockKind::Heading { level, inline, .. } => {
                let marker = "#".repeat(*level as usize);
                match inline {
                    Some(span) => format!("{} {}", marker, source[span.clone()].trim()),
                    None => marker,
                }
            }
            BlockKind::Other => {
                // indented code spans start after their indentation
                let start = source[..self.range.start].rfind('\n').map_or(0, |i| i + 1);
                source[start..self.range.end].trim_end().to_string()
            }
        }
    }
}

fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_WIKILINKS);
    options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);
    options
}

fn top_level_blocks(text: &str) -> Vec<Block> {
    let parser = Parser::new_ext(text, parser_options());

    let mut blocks = Vec::new();
    let mut depth = 0usize;
    let mut heading: Option<(u8, String, Option<Range<usize>>, Range<usize>)> = None;

    for (event, range) in parser.into_offset_iter() {
        match event {
            Event::Start(Tag::Heading { level, .. }) if depth == 0 => {
                heading = Some((level as u8, String::new(), None, range));
                depth += 1;
            }
            Event::End(TagEnd::Heading(_)) if depth == 1 => {
                if let Some((level, text, inline, range)) = heading.take() {
                    blocks.push(Block {
                        kind: BlockKind::Heading {
                            level,
                            text: text.trim().to_string(),
                            inline,
                        },
                        range,
                    });
                }
                depth -= 1;
            }
            Event::Start(_) => {
                if depth == 0 {
                    blocks.push(Block {
                        kind: BlockKind::Other,
                        range: range.clone(),
                    });
                }
                depth += 1;
                extend_inline(&mut heading, &range);
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
            }
            Event::Rule if depth == 0 => {
                blocks.push(Block {
                    kind: BlockKind::Other,
                    range,
                });
            }
            Event::Text(ref s) | Event::Code(ref s) => {
                if let Some((_, text, _, _)) = heading.as_mut() {
                    text.push_str(s);
                }
                extend_inline(&mut heading, &range);
            }
            _ => extend_inline(&mut heading, &range),
        }
    }

    blocks
}

fn extend_inline(
    heading: &mut Option<(u8, String, Option<Range<usize>>, Range<usize>)>,
    range: &Range<usize>,
) {
    if let Some((_, _, inline, _)) = heading.as_mut() {
        *inline = Some(match inline.take() {
            Some(span) => span.start.min(range.start)..span.end.max(range.end),
            None => range.clone(),
        });
    }
}

/// Narrow `content` to the level-2 sections named in `targets`.
///
/// Without targets (or with an empty list) the content comes back untouched.
/// Sections are emitted in document order; names that match nothing are
/// ignored, and if nothing matches the content is empty.
pub fn extract_sections(content: &str, targets: Option<&[String]>) -> SectionExtract {
    let blocks = top_level_blocks(content);
    let headings: Vec<String> = blocks
        .iter()
        .filter_map(|b| b.section_title().map(str::to_string))
        .collect();

    let targets = match targets {
        Some(t) if !t.is_empty() => t,
        _ => {
            return SectionExtract {
                content: content.to_string(),
                headings,
            }
        }
    };

    let mut sections = Vec::new();
    let mut i = 0;
    while i < blocks.len() {
        let wanted = blocks[i]
            .section_title()
            .is_some_and(|title| targets.iter().any(|t| t == title));
        if !wanted {
            i += 1;
            continue;
        }

        let mut parts = vec![blocks[i].to_markdown(content)];
        i += 1;
        while i < blocks.len() && !blocks[i].heading_level().is_some_and(|l| l <= SECTION_LEVEL) {
            parts.push(blocks[i].to_markdown(content));
            i += 1;
        }
        sections.push(parts.join("\n\n"));
    }

    SectionExtract {
        content: sections.join("\n\n"),
        headings,
    }
}
