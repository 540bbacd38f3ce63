//! Subprocess plumbing.
//!
//! Everything that spawns a process goes through [`Launcher`], so the
//! orchestrator can be driven against a fake in tests.

use async_trait::async_trait;
use std::io;
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;

/// Exit state of a finished child. `code` is `None` when it died from a signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitInfo {
    pub code: Option<i32>,
}

impl ExitInfo {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captured {
    pub exit: ExitInfo,
    pub stdout: String,
}

#[async_trait]
pub trait Launcher: Send + Sync {
    /// Run `program args` with the terminal inherited.
    /// Returns once the child has terminated.
    async fn run_inherited(&self, program: &str, args: &[String]) -> io::Result<ExitInfo>;

    /// Run `program args` directly with stdout captured and stderr discarded.
    async fn capture(&self, program: &str, args: &[String]) -> io::Result<Captured>;
}

/// Real launcher backed by `tokio::process`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

/// Command for an interactive run. On Unix the line goes through `sh -c`
/// with every word quoted. On Windows the resolved binary is spawned with its
/// argv as-is: `cmd /C` would still expand `%VAR%` inside a quoted task.
#[cfg(not(windows))]
fn interactive_command(program: &str, args: &[String]) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(crate::util::shell_line(program, args));
    cmd
}

#[cfg(windows)]
fn interactive_command(program: &str, args: &[String]) -> Command {
    // `which` honours PATHEXT, so npm `.cmd` shims resolve too.
    let resolved = which::which(program).unwrap_or_else(|_| program.into());
    let mut cmd = Command::new(resolved);
    cmd.args(args);
    cmd
}

#[async_trait]
impl Launcher for SystemLauncher {
    async fn run_inherited(&self, program: &str, args: &[String]) -> io::Result<ExitInfo> {
        tracing::debug!(program, ?args, "spawning");
        let status = interactive_command(program, args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await?;
        Ok(ExitInfo {
            code: status.code(),
        })
    }

    async fn capture(&self, program: &str, args: &[String]) -> io::Result<Captured> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await?;
        Ok(Captured {
            exit: ExitInfo {
                code: output.status.code(),
            },
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("{program} exited with code {code}")]
    NonZeroExit { program: String, code: i32 },

    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} was terminated by a signal")]
    Terminated { program: String },
}

impl RunError {
    /// Process exit code to report for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::NonZeroExit { code, .. } => *code,
            RunError::Launch { .. } => 127,
            RunError::Terminated { .. } => 130,
        }
    }
}

#[derive(Clone)]
pub struct CommandRunner {
    launcher: Arc<dyn Launcher>,
}

impl CommandRunner {
    pub fn new(launcher: Arc<dyn Launcher>) -> Self {
        CommandRunner { launcher }
    }

    pub fn system() -> Self {
        CommandRunner::new(Arc::new(SystemLauncher))
    }

    /// Run to completion. Resolves only after the child has terminated.
    pub async fn run(&self, program: &str, args: &[String]) -> Result<(), RunError> {
        let exit = match self.launcher.run_inherited(program, args).await {
            Ok(exit) => exit,
            Err(source) => {
                tracing::warn!(program, error = %source, "launch failed");
                return Err(RunError::Launch {
                    program: program.to_string(),
                    source,
                });
            }
        };
        tracing::debug!(program, code = ?exit.code, "process exited");

        match exit.code {
            Some(0) => Ok(()),
            Some(code) => {
                tracing::warn!(program, code, "process exited non-zero");
                Err(RunError::NonZeroExit {
                    program: program.to_string(),
                    code,
                })
            }
            None => Err(RunError::Terminated {
                program: program.to_string(),
            }),
        }
    }
}
