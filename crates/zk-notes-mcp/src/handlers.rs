//! MCP Tool handlers
//!
//! Maps tool names onto the core handlers and their JSON in/out shapes.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use zk_notes_core::handlers::{
    CreateNoteInput, LinkedNotesInput, ListNotesInput, NoteContentInput,
};
use zk_notes_core::{Handlers, ZkError};

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: String,
        #[source]
        source: serde_json::Error,
    },

    /// Kind and message of the notebook failure, verbatim
    #[error("{}: {}", .0.kind(), .0)]
    Zk(#[from] ZkError),

    #[error("Failed to serialize result: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Handles MCP tool calls
pub struct ToolHandler {
    handlers: Handlers,
}

impl ToolHandler {
    pub fn new(handlers: Handlers) -> Self {
        Self { handlers }
    }

    /// Handle a tool call and return the result as JSON
    pub fn handle(&self, name: &str, args: Option<Value>) -> Result<Value, ToolError> {
        let args = args.unwrap_or(json!({}));
        let h = &self.handlers;

        match name {
            "list_notes" => {
                to_json(h.list_notes.handle(&parse::<ListNotesInput>(name, args)?)?)
            }
            "get_note_content" => {
                to_json(h.note_content.handle(&parse::<NoteContentInput>(name, args)?)?)
            }
            "get_link_to_notes" => {
                to_json(h.link_to.handle(&parse::<LinkedNotesInput>(name, args)?)?)
            }
            "get_linked_by_notes" => {
                to_json(h.linked_by.handle(&parse::<LinkedNotesInput>(name, args)?)?)
            }
            "get_related_notes" => {
                to_json(h.related.handle(&parse::<LinkedNotesInput>(name, args)?)?)
            }
            "get_tagless_notes" => to_json(h.tagless.handle()?),
            "get_last_modified_note" => to_json(h.last_modified.handle()?),
            "get_random_note" => to_json(h.random.handle()?),
            "create_note" => {
                to_json(h.create_note.handle(&parse::<CreateNoteInput>(name, args)?)?)
            }
            "get_tags" => to_json(h.tags.handle()?),
            _ => Err(ToolError::UnknownTool(name.to_string())),
        }
    }
}

fn parse<T: DeserializeOwned>(tool: &str, args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(|source| ToolError::InvalidArguments {
        tool: tool.to_string(),
        source,
    })
}

fn to_json<T: Serialize>(output: T) -> Result<Value, ToolError> {
    serde_json::to_value(output).map_err(ToolError::Serialize)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::path::Path;
    use std::sync::{Arc, Mutex};
    use zk_notes_core::process::{CommandOutput, CommandRunner};
    use zk_notes_core::ZkClient;

    /// Replays stdout/stderr pairs; `Err` entries exit non-zero
    #[derive(Default)]
    pub(crate) struct FakeZk {
        pub calls: Mutex<Vec<Vec<String>>>,
        replies: Mutex<VecDeque<Result<String, String>>>,
    }

    impl FakeZk {
        pub fn reply(&self, stdout: &str) {
            self.replies.lock().unwrap().push_back(Ok(stdout.to_string()));
        }

        pub fn reply_err(&self, stderr: &str) {
            self.replies.lock().unwrap().push_back(Err(stderr.to_string()));
        }
    }

    impl CommandRunner for FakeZk {
        fn run(
            &self,
            _program: &str,
            args: &[String],
            _cwd: &Path,
        ) -> std::io::Result<CommandOutput> {
            self.calls.lock().unwrap().push(args.to_vec());
            let reply = self.replies.lock().unwrap().pop_front().unwrap_or(Ok(String::new()));
            Ok(match reply {
                Ok(stdout) => CommandOutput {
                    success: true,
                    status: Some(0),
                    stdout,
                    stderr: String::new(),
                },
                Err(stderr) => CommandOutput {
                    success: false,
                    status: Some(1),
                    stdout: String::new(),
                    stderr,
                },
            })
        }
    }

    pub(crate) fn tool_handler(zk: &Arc<FakeZk>) -> ToolHandler {
        let client = ZkClient::with_runner("/notebook", "zk", zk.clone());
        ToolHandler::new(Handlers::from_client(Arc::new(client), 10))
    }

    #[test]
    fn test_list_notes_with_defaults() {
        let zk = Arc::new(FakeZk::default());
        zk.reply("");
        zk.reply("/a.md|A|x\n/b.md|B|\n");

        let value = tool_handler(&zk).handle("list_notes", None).unwrap();

        assert_eq!(value["pagination"]["page"], 1);
        assert_eq!(value["pagination"]["per_page"], 10);
        assert_eq!(value["pagination"]["total"], 2);
        assert_eq!(value["notes"][0]["path"], "/a.md");
        assert_eq!(value["notes"][0]["tags"], json!(["x"]));
        assert!(value["notes"][0].get("content").is_none());
    }

    #[test]
    fn test_list_notes_passes_filters() {
        let zk = Arc::new(FakeZk::default());
        let args = json!({
            "tags": ["x", "y"],
            "tags_match_mode": "OR",
            "per_page": 5
        });

        tool_handler(&zk).handle("list_notes", Some(args)).unwrap();

        let calls = zk.calls.lock().unwrap();
        let list = calls.last().unwrap();
        assert_eq!(&list[list.len() - 2..], &["--tag".to_string(), "xORy".to_string()]);
    }

    #[test]
    fn test_get_note_content_with_headings() {
        let zk = Arc::new(FakeZk::default());
        zk.reply("");
        zk.reply("/n.md|N|\n");
        zk.reply("## A\n\nalpha\n\n## B\n\nbeta\n");

        let args = json!({"path": "/n.md", "headings": ["A"]});
        let value = tool_handler(&zk).handle("get_note_content", Some(args)).unwrap();

        assert_eq!(value["content"], "## A\n\nalpha");
        assert_eq!(value["headings"], json!(["A", "B"]));
    }

    #[test]
    fn test_create_note() {
        let zk = Arc::new(FakeZk::default());
        zk.reply("");
        zk.reply("/notebook/inbox/idea.md\n");

        let args = json!({"title": "Idea", "path": "inbox"});
        let value = tool_handler(&zk).handle("create_note", Some(args)).unwrap();

        assert_eq!(value["note"]["path"], "/notebook/inbox/idea.md");
        assert_eq!(value["note"]["tags"], json!([]));
    }

    #[test]
    fn test_missing_required_argument() {
        let zk = Arc::new(FakeZk::default());
        let err = tool_handler(&zk)
            .handle("get_linked_by_notes", Some(json!({"page": 2})))
            .unwrap_err();

        assert!(matches!(err, ToolError::InvalidArguments { .. }));
        assert!(zk.calls.lock().unwrap().is_empty(), "zk must not run");
    }

    #[test]
    fn test_unknown_tool() {
        let zk = Arc::new(FakeZk::default());
        let err = tool_handler(&zk).handle("delete_everything", None).unwrap_err();
        assert_eq!(err.to_string(), "Unknown tool: delete_everything");
    }

    #[test]
    fn test_errors_report_kind_and_message() {
        let zk = Arc::new(FakeZk::default());
        zk.reply_err("zk: error: not a notebook");

        let err = tool_handler(&zk).handle("get_tags", None).unwrap_err();
        assert_eq!(err.to_string(), "ExternalToolError: zk: error: not a notebook");

        zk.reply("");
        zk.reply("");
        let err = tool_handler(&zk).handle("get_random_note", None).unwrap_err();
        assert_eq!(err.to_string(), "NotFoundError: Random note not found");
    }
}
