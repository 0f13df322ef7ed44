//! MCP Tool definitions

use super::protocol::{InputSchema, ToolDefinition};
use serde_json::{json, Value};

/// Generate all tool definitions
pub fn all_tools() -> Vec<ToolDefinition> {
    let mut tools = Vec::new();
    tools.extend(note_query_tools());
    tools.extend(link_tools());
    tools.extend(note_pick_tools());
    tools.extend(note_command_tools());
    tools.extend(tag_tools());
    tools
}

fn tool(
    name: &str,
    description: &str,
    properties: Option<Value>,
    required: &[&str],
) -> ToolDefinition {
    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema: InputSchema {
            schema_type: "object".to_string(),
            properties,
            required: if required.is_empty() {
                None
            } else {
                Some(required.iter().map(|r| r.to_string()).collect())
            },
        },
    }
}

fn match_mode(what: &str) -> Value {
    json!({
        "type": "string",
        "enum": ["AND", "OR"],
        "description": format!("How {} are combined. AND: all must match, OR: any may match (default AND)", what)
    })
}

// ============================================================================
// Note queries
// ============================================================================

fn note_query_tools() -> Vec<ToolDefinition> {
    vec![
        tool(
            "list_notes",
            "Search notes by title, full text and tags. Conditions can be combined; results are sorted by title and paginated",
            Some(json!({
                "page": {"type": "integer", "description": "Page number, starting from 1 (default 1)"},
                "per_page": {"type": "integer", "description": "Notes per page (default from server config)"},
                "title_patterns": {"type": "array", "items": {"type": "string"}, "description": "Patterns to look for in titles, e.g. ['meeting', 'project']"},
                "title_match_mode": match_mode("title patterns"),
                "search_patterns": {"type": "array", "items": {"type": "string"}, "description": "Patterns to look for in note bodies, e.g. ['Python', 'API']"},
                "search_match_mode": match_mode("search patterns"),
                "tags": {"type": "array", "items": {"type": "string"}, "description": "Tags to filter by, e.g. ['work', 'important']"},
                "tags_match_mode": match_mode("tags"),
                "created_after": {"type": "string", "description": "Only notes created after this date, e.g. '2024-01-31' or 'last week'"},
                "modified_after": {"type": "string", "description": "Only notes modified after this date"}
            })),
            &[],
        ),
        tool(
            "get_note_content",
            "Read a note's markdown. Returns the level-2 heading outline; pass headings to receive only those sections",
            Some(json!({
                "path": {"type": "string", "description": "Path to the note, e.g. 'notes/my-note.md'"},
                "headings": {"type": "array", "items": {"type": "string"}, "description": "Level-2 heading texts whose sections should be returned"}
            })),
            &["path"],
        ),
    ]
}

// ============================================================================
// Link graph
// ============================================================================

fn paged_path(path_description: &str) -> Value {
    json!({
        "path": {"type": "string", "description": path_description},
        "page": {"type": "integer", "description": "Page number, starting from 1 (default 1)"},
        "per_page": {"type": "integer", "description": "Notes per page (default from server config)"}
    })
}

fn link_tools() -> Vec<ToolDefinition> {
    vec![
        tool(
            "get_link_to_notes",
            "Notes the given note links to (outbound links)",
            Some(paged_path("Path of the source note")),
            &["path"],
        ),
        tool(
            "get_linked_by_notes",
            "Notes that link to the given note (inbound links)",
            Some(paged_path("Path of the target note")),
            &["path"],
        ),
        tool(
            "get_related_notes",
            "Link candidates: notes not connected to the given note but sharing at least one linked note with it",
            Some(paged_path("Path of the note to find link candidates for")),
            &["path"],
        ),
    ]
}

// ============================================================================
// Unfiltered picks
// ============================================================================

fn note_pick_tools() -> Vec<ToolDefinition> {
    vec![
        tool("get_tagless_notes", "All notes without any tag", None, &[]),
        tool("get_last_modified_note", "The most recently modified note", None, &[]),
        tool("get_random_note", "One note picked at random", None, &[]),
    ]
}

// ============================================================================
// Commands
// ============================================================================

fn note_command_tools() -> Vec<ToolDefinition> {
    vec![tool(
        "create_note",
        "Create a new note with the given title at the given path",
        Some(json!({
            "title": {"type": "string", "description": "Title of the new note, e.g. 'Meeting Notes - Project Alpha'"},
            "path": {"type": "string", "description": "Directory or file path for the note, e.g. 'notes/meeting-notes.md'"}
        })),
        &["title", "path"],
    )]
}

fn tag_tools() -> Vec<ToolDefinition> {
    vec![tool(
        "get_tags",
        "All tags used in the notebook with their note counts",
        None,
        &[],
    )]
}
