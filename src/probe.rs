//! Install and version checks. None of these ever fail; a probe that cannot
//! run reports the agent as missing.

use crate::agents::AgentDescriptor;
use crate::process::Launcher;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionStatus {
    Version(String),
    /// Exited 0 without printing anything.
    Installed,
    /// Ran but exited non-zero.
    Error,
    NotFound,
}

impl fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionStatus::Version(v) => f.write_str(v),
            VersionStatus::Installed => f.write_str("installed"),
            VersionStatus::Error => f.write_str("not found or error"),
            VersionStatus::NotFound => f.write_str("not found"),
        }
    }
}

#[derive(Clone)]
pub struct InstallChecker {
    launcher: Arc<dyn Launcher>,
}

fn lookup_utility() -> &'static str {
    if cfg!(windows) {
        "where"
    } else {
        "which"
    }
}

impl InstallChecker {
    pub fn new(launcher: Arc<dyn Launcher>) -> Self {
        InstallChecker { launcher }
    }

    pub async fn is_installed(&self, binary: &str) -> bool {
        let args = [binary.to_string()];
        match self.launcher.capture(lookup_utility(), &args).await {
            Ok(out) => {
                tracing::trace!(binary, code = ?out.exit.code, "lookup finished");
                out.exit.success()
            }
            Err(err) => {
                tracing::debug!(binary, error = %err, "lookup could not run");
                false
            }
        }
    }

    pub async fn version(&self, agent: &AgentDescriptor) -> VersionStatus {
        let args = [agent.version_arg.to_string()];
        match self.launcher.capture(agent.binary, &args).await {
            Ok(out) if out.exit.success() => first_line(&out.stdout)
                .map(VersionStatus::Version)
                .unwrap_or(VersionStatus::Installed),
            Ok(out) => {
                tracing::debug!(agent = agent.key, code = ?out.exit.code, "version query failed");
                VersionStatus::Error
            }
            Err(err) => {
                tracing::debug!(agent = agent.key, error = %err, "version query could not run");
                VersionStatus::NotFound
            }
        }
    }
}

fn first_line(output: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(|l| l.to_string())
}
