//! External Tool Invoker: every notebook operation goes through `zk`.
//!
//! Each public operation first runs `zk index --quiet` so the tool's index
//! reflects the files on disk, then issues its own invocation(s).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::ZkConfig;
use crate::error::{Result, ZkError};
use crate::model::{Note, Tag};
use crate::process::{CommandRunner, SystemCommandRunner};
use crate::record;

pub const FORMAT_NOTE: &str = r#"{{path}}|{{title}}|{{join tags ","}}"#;
pub const FORMAT_CONTENT: &str = "{{raw-content}}";
pub const FORMAT_TAG: &str = "{{name}}|{{note-count}}";

/// Sort order for single-note picks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    LastModified,
    Random,
}

impl Pick {
    fn sort_key(self) -> &'static str {
        match self {
            Pick::LastModified => "modified-",
            Pick::Random => "random",
        }
    }
}

pub struct ZkClient {
    cwd: PathBuf,
    program: String,
    runner: Arc<dyn CommandRunner>,
}

impl ZkClient {
    pub fn new(config: &ZkConfig) -> Self {
        Self::with_runner(
            config.notebook_dir.clone(),
            config.zk_binary.clone(),
            Arc::new(SystemCommandRunner),
        )
    }

    pub fn with_runner(
        cwd: impl Into<PathBuf>,
        program: impl Into<String>,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            cwd: cwd.into(),
            program: program.into(),
            runner,
        }
    }

    fn execute(&self, args: Vec<String>) -> Result<String> {
        log::debug!("Running {} {:?} in {:?}", self.program, args, self.cwd);

        let output = self
            .runner
            .run(&self.program, &args, &self.cwd)
            .map_err(|source| ZkError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.success {
            log::debug!("{} exited with {:?}", self.program, output.status);
            return Err(ZkError::ExternalTool {
                stderr: output.stderr,
                status: output.status,
            });
        }

        Ok(output.stdout)
    }

    fn refresh_index(&self) -> Result<()> {
        self.execute(args(&["index", "--quiet"])).map(|_| ())
    }

    fn list_args(format: &str, filters: &[String]) -> Vec<String> {
        let mut command = args(&[
            "list",
            "--quiet",
            "--no-pager",
            "--sort",
            "title",
            "--format",
            format,
        ]);
        command.extend(filters.iter().cloned());
        command
    }

    fn list_single(&self, format: &str, filters: &[String]) -> Result<String> {
        let stdout = self.execute(Self::list_args(format, filters))?;
        Ok(stdout.trim().to_string())
    }

    fn list_lines(&self, format: &str, filters: &[String]) -> Result<Vec<String>> {
        let stdout = self.execute(Self::list_args(format, filters))?;
        Ok(split_lines(&stdout))
    }

    /// `zk list` with the given filter arguments, one note per output line.
    pub fn notes(&self, filters: &[String]) -> Result<Vec<Note>> {
        self.refresh_index()?;
        let lines = self.list_lines(FORMAT_NOTE, filters)?;
        Ok(record::parse_note_lines(&lines))
    }

    pub fn tagless_notes(&self) -> Result<Vec<Note>> {
        self.notes(&args(&["--tagless"]))
    }

    /// Record and raw content of the note at `path`, `None` if `zk` knows no such note.
    pub fn note_with_content(&self, path: &Path) -> Result<Option<Note>> {
        self.refresh_index()?;

        let target = vec![path.to_string_lossy().into_owned()];
        let line = self.list_single(FORMAT_NOTE, &target)?;
        let Some(mut note) = record::parse_note_line(&line) else {
            return Ok(None);
        };

        note.content = Some(self.list_single(FORMAT_CONTENT, &target)?);
        Ok(Some(note))
    }

    pub fn tags(&self) -> Result<Vec<Tag>> {
        self.refresh_index()?;
        let stdout = self.execute(args(&[
            "tag",
            "list",
            "--quiet",
            "--no-pager",
            "--format",
            FORMAT_TAG,
        ]))?;
        record::parse_tag_lines(&split_lines(&stdout))
    }

    /// `zk new`; the returned note carries the path `zk` printed and no tags.
    pub fn create_note(&self, title: &str, path: &Path) -> Result<Note> {
        self.refresh_index()?;
        let stdout = self.execute(vec![
            "new".to_string(),
            "--print-path".to_string(),
            "--title".to_string(),
            title.to_string(),
            path.to_string_lossy().into_owned(),
        ])?;

        Ok(Note::new(stdout.trim(), title, Vec::new()))
    }

    pub fn pick_note(&self, pick: Pick) -> Result<Option<Note>> {
        self.refresh_index()?;
        let stdout = self.execute(args(&[
            "list",
            "--quiet",
            "--no-pager",
            "--limit",
            "1",
            "--sort",
            pick.sort_key(),
            "--format",
            FORMAT_NOTE,
        ]))?;
        Ok(record::parse_note_line(stdout.trim()))
    }
}

fn args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

fn split_lines(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::process::CommandOutput;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays queued outputs and records every argv it was asked to run
    #[derive(Default)]
    pub(crate) struct ScriptedRunner {
        pub calls: Mutex<Vec<Vec<String>>>,
        replies: Mutex<VecDeque<CommandOutput>>,
    }

    impl ScriptedRunner {
        pub fn ok(&self, stdout: &str) -> &Self {
            self.replies.lock().unwrap().push_back(CommandOutput {
                success: true,
                status: Some(0),
                stdout: stdout.to_string(),
                stderr: String::new(),
            });
            self
        }

        pub fn fail(&self, stderr: &str) -> &Self {
            self.replies.lock().unwrap().push_back(CommandOutput {
                success: false,
                status: Some(1),
                stdout: String::new(),
                stderr: stderr.to_string(),
            });
            self
        }

        pub fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl CommandRunner for ScriptedRunner {
        fn run(
            &self,
            program: &str,
            args: &[String],
            _cwd: &Path,
        ) -> std::io::Result<CommandOutput> {
            assert_eq!(program, "zk");
            self.calls.lock().unwrap().push(args.to_vec());
            // unscripted calls succeed silently
            Ok(self.replies.lock().unwrap().pop_front().unwrap_or(CommandOutput {
                success: true,
                status: Some(0),
                ..Default::default()
            }))
        }
    }

    pub(crate) fn client(runner: &Arc<ScriptedRunner>) -> ZkClient {
        ZkClient::with_runner("/notebook", "zk", runner.clone())
    }

    fn index_call() -> Vec<String> {
        args(&["index", "--quiet"])
    }

    #[test]
    fn test_notes_refreshes_index_then_lists() {
        let runner = Arc::new(ScriptedRunner::default());
        runner
            .ok("")
            .ok("/path1.md|Note 1|tag1\n/path2.md|Note 2|tag2,tag3\n");

        let notes = client(&runner).notes(&[]).unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], index_call());
        assert_eq!(
            calls[1],
            args(&[
                "list",
                "--quiet",
                "--no-pager",
                "--sort",
                "title",
                "--format",
                r#"{{path}}|{{title}}|{{join tags ","}}"#,
            ])
        );
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[1].tags, vec!["tag2", "tag3"]);
    }

    #[test]
    fn test_notes_appends_filters_and_skips_blank_lines() {
        let runner = Arc::new(ScriptedRunner::default());
        runner.ok("").ok("\n/python.md|Python Note|python\n\nbroken line\n");

        let filters = args(&["--tag", "python"]);
        let notes = client(&runner).notes(&filters).unwrap();

        let last = runner.calls().pop().unwrap();
        assert_eq!(&last[last.len() - 2..], &filters[..]);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "Python Note");
    }

    #[test]
    fn test_index_failure_stops_operation() {
        let runner = Arc::new(ScriptedRunner::default());
        runner.fail("Error: zk command failed");

        let err = client(&runner).notes(&[]).unwrap_err();
        assert_eq!(err.to_string(), "Error: zk command failed");
        assert_eq!(err.kind(), "ExternalToolError");
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn test_list_failure_carries_stderr() {
        let runner = Arc::new(ScriptedRunner::default());
        runner.ok("").fail("zk: error: unknown flag --bogus\n");

        let err = client(&runner).tagless_notes().unwrap_err();
        match err {
            ZkError::ExternalTool { stderr, status } => {
                assert_eq!(stderr, "zk: error: unknown flag --bogus\n");
                assert_eq!(status, Some(1));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_tagless_notes_uses_flag() {
        let runner = Arc::new(ScriptedRunner::default());
        runner.ok("").ok("/loose.md|Loose|\n");

        let notes = client(&runner).tagless_notes().unwrap();
        assert_eq!(runner.calls()[1].last().unwrap(), "--tagless");
        assert!(notes[0].tags.is_empty());
    }

    #[test]
    fn test_note_with_content_issues_one_refresh() {
        let runner = Arc::new(ScriptedRunner::default());
        runner
            .ok("")
            .ok("/path/to/test.md|Test|tag1,tag2\n")
            .ok("# Test\n\nBody\n");

        let note = client(&runner)
            .note_with_content(Path::new("/path/to/test.md"))
            .unwrap()
            .unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0], index_call());
        assert!(calls[1].contains(&FORMAT_NOTE.to_string()));
        assert_eq!(
            calls[2][calls[2].len() - 2..],
            args(&["{{raw-content}}", "/path/to/test.md"])[..]
        );
        assert_eq!(note.content.as_deref(), Some("# Test\n\nBody"));
        assert_eq!(note.tags, vec!["tag1", "tag2"]);
    }

    #[test]
    fn test_note_with_content_missing() {
        let runner = Arc::new(ScriptedRunner::default());
        runner.ok("").ok("");

        let note = client(&runner).note_with_content(Path::new("nope.md")).unwrap();
        assert!(note.is_none());
        assert_eq!(runner.calls().len(), 2, "content is not fetched for a missing note");
    }

    #[test]
    fn test_tags() {
        let runner = Arc::new(ScriptedRunner::default());
        runner.ok("").ok("tag1|5\ntag2|3\nprogramming|10\n");

        let tags = client(&runner).tags().unwrap();
        assert_eq!(
            runner.calls()[1],
            args(&["tag", "list", "--quiet", "--no-pager", "--format", "{{name}}|{{note-count}}"])
        );
        assert_eq!(tags.len(), 3);
        assert_eq!(tags[2].name, "programming");
        assert_eq!(tags[2].note_count, 10);
    }

    #[test]
    fn test_create_note() {
        let runner = Arc::new(ScriptedRunner::default());
        runner.ok("").ok("/notebook/ideas/new-note.md\n");

        let note = client(&runner)
            .create_note("New | Note", Path::new("ideas"))
            .unwrap();

        assert_eq!(
            runner.calls()[1],
            args(&["new", "--print-path", "--title", "New | Note", "ideas"])
        );
        assert_eq!(note.path, PathBuf::from("/notebook/ideas/new-note.md"));
        assert_eq!(note.title, "New | Note");
        assert!(note.tags.is_empty());
    }

    #[test]
    fn test_pick_note_sort_orders() {
        let runner = Arc::new(ScriptedRunner::default());
        runner.ok("").ok("/recent.md|Recent|a\n").ok("").ok("");

        let zk = client(&runner);
        let recent = zk.pick_note(Pick::LastModified).unwrap().unwrap();
        assert_eq!(recent.title, "Recent");
        assert!(zk.pick_note(Pick::Random).unwrap().is_none());

        let calls = runner.calls();
        assert_eq!(
            calls[1],
            args(&[
                "list", "--quiet", "--no-pager", "--limit", "1", "--sort", "modified-", "--format",
                FORMAT_NOTE,
            ])
        );
        assert!(calls[3].contains(&"random".to_string()));
    }

    #[test]
    fn test_spawn_failure() {
        struct Missing;
        impl CommandRunner for Missing {
            fn run(&self, _: &str, _: &[String], _: &Path) -> std::io::Result<CommandOutput> {
                Err(std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"))
            }
        }

        let zk = ZkClient::with_runner("/notebook", "zk", Arc::new(Missing));
        let err = zk.tags().unwrap_err();
        assert_eq!(err.kind(), "SpawnError");
    }
}
