use std::num::ParseIntError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ZkError>;

#[derive(Debug, Error)]
pub enum ZkError {
    /// `zk` ran and exited non-zero; the message is its stderr as captured
    #[error("{stderr}")]
    ExternalTool { stderr: String, status: Option<i32> },

    #[error("{0}")]
    NotFound(String),

    #[error("invalid count in record {line:?}: {source}")]
    Parse {
        line: String,
        #[source]
        source: ParseIntError,
    },

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Config(String),
}

impl ZkError {
    /// Stable name reported to callers alongside the message
    pub fn kind(&self) -> &'static str {
        match self {
            ZkError::ExternalTool { .. } => "ExternalToolError",
            ZkError::NotFound(_) => "NotFoundError",
            ZkError::Parse { .. } => "ParseError",
            ZkError::Spawn { .. } => "SpawnError",
            ZkError::Config(_) => "ConfigError",
        }
    }
}
