use std::path::Path;
use std::process::Command;

/// Captured result of one finished process
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub success: bool,
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Abstract interface for running external programs.
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` inside `cwd` and wait for it to exit.
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> std::io::Result<CommandOutput>;
}

/// Standard implementation of CommandRunner using std::process.
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> std::io::Result<CommandOutput> {
        let output = Command::new(program).args(args).current_dir(cwd).output()?;

        Ok(CommandOutput {
            success: output.status.success(),
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
