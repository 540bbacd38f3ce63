use crate::agents::AgentKind;
use crate::process::RunError;

#[derive(Debug, thiserror::Error)]
pub enum OrchestraError {
    #[error("Unknown agent: {key}")]
    UnknownAgent { key: String, available: String },

    #[error("agent '{key}' is not a {expected} agent")]
    KindMismatch { key: String, expected: AgentKind },

    #[error("task description is required")]
    EmptyTask,

    #[error("parallel count must be at least 1, got {0}")]
    InvalidParallel(u32),

    #[error(transparent)]
    Run(#[from] RunError),
}

impl OrchestraError {
    pub fn exit_code(&self) -> i32 {
        match self {
            OrchestraError::Run(err) => err.exit_code(),
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, OrchestraError>;
