use crate::agents::{self, AgentDescriptor, AgentKind, InvocationRequest, Registry};
use crate::config::appsettings::DispatchSettings;
use crate::dispatch::{self, Classifier, Route};
use crate::error::{OrchestraError, Result};
use crate::probe::{InstallChecker, VersionStatus};
use crate::process::{CommandRunner, Launcher, SystemLauncher};
use crate::util;
use crossterm::style::Stylize;
use std::sync::Arc;

/// Owns the registry and the process capability; every subcommand goes
/// through here.
pub struct Orchestra {
    registry: Registry,
    settings: DispatchSettings,
    classifier: Classifier,
    runner: CommandRunner,
    checker: InstallChecker,
}

impl Orchestra {
    pub fn new(registry: Registry, settings: DispatchSettings, launcher: Arc<dyn Launcher>) -> Self {
        let classifier = Classifier::from_settings(&settings);
        Orchestra {
            registry,
            settings,
            classifier,
            runner: CommandRunner::new(Arc::clone(&launcher)),
            checker: InstallChecker::new(launcher),
        }
    }

    pub fn system(settings: DispatchSettings) -> Self {
        Orchestra::new(Registry::builtin(), settings, Arc::new(SystemLauncher))
    }

    pub fn resolve(&self, key: &str) -> Result<&AgentDescriptor> {
        self.registry
            .lookup(key)
            .ok_or_else(|| OrchestraError::UnknownAgent {
                key: key.to_string(),
                available: agents::format_agents(&self.registry.keys()),
            })
    }

    fn resolve_kind(&self, key: &str, expected: AgentKind) -> Result<&AgentDescriptor> {
        let agent = self.resolve(key)?;
        if agent.kind != expected {
            return Err(OrchestraError::KindMismatch {
                key: key.to_string(),
                expected,
            });
        }
        Ok(agent)
    }

    async fn exec(&self, agent: &AgentDescriptor, args: Vec<String>) -> Result<()> {
        let line = format!("Running: {}", util::display_command(agent.binary, &args));
        println!("{}", line.dark_grey());
        tracing::info!(agent = agent.key, "delegating");
        self.runner.run(agent.binary, &args).await?;
        Ok(())
    }

    pub async fn run(&self, req: &InvocationRequest) -> Result<()> {
        let agent = self.resolve(&req.agent)?;
        validate_request(req)?;
        let args = agents::build_args(agent, req);
        self.exec(agent, args).await
    }

    pub async fn run_claude(&self, task: &str) -> Result<()> {
        self.run(&InvocationRequest::new("claude", task)).await
    }

    pub async fn run_gemini(&self, task: &str, yolo: bool) -> Result<()> {
        let mut req = InvocationRequest::new("gemini", task);
        req.auto_approve = yolo;
        self.run(&req).await
    }

    pub async fn run_jules(&self, task: &str, repo: Option<&str>, parallel: u32) -> Result<()> {
        let mut req = InvocationRequest::new("jules", task);
        req.repo = repo.map(str::to_string);
        req.parallel = parallel;
        self.run(&req).await
    }

    /// Route `task` with the keyword heuristic and run it. `None` for either
    /// agent falls back to the configured default.
    pub async fn dispatch(
        &self,
        task: &str,
        sync_agent: Option<&str>,
        async_agent: Option<&str>,
        repo: Option<&str>,
    ) -> Result<Route> {
        let sync_key = sync_agent.unwrap_or(self.settings.sync_agent.as_str());
        let async_key = async_agent.unwrap_or(self.settings.async_agent.as_str());
        self.resolve_kind(sync_key, AgentKind::Sync)?;
        self.resolve_kind(async_key, AgentKind::Async)?;

        let route = dispatch::route(&self.classifier, task, repo, sync_key, async_key);
        tracing::debug!(?route, "dispatch decided");

        let req = match &route {
            Route::Async { agent, repo } => {
                println!("{}", format!("Dispatching to {} (async)...", agent).yellow());
                InvocationRequest {
                    repo: Some(repo.clone()),
                    ..InvocationRequest::new(agent, task)
                }
            }
            Route::Sync { agent } => {
                println!("{}", format!("Dispatching to {} (sync)...", agent).blue());
                InvocationRequest::new(agent, task)
            }
        };
        self.run(&req).await?;
        Ok(route)
    }

    fn session_agent(&self) -> Result<&AgentDescriptor> {
        self.resolve_kind(&self.settings.async_agent, AgentKind::Async)
    }

    pub async fn list_sessions(&self) -> Result<()> {
        let agent = self.session_agent()?;
        self.exec(agent, agents::session_list_args()).await
    }

    pub async fn pull_session(&self, id: &str, apply: bool) -> Result<()> {
        let agent = self.session_agent()?;
        self.exec(agent, agents::session_pull_args(id, apply)).await
    }

    /// Install state of every agent in registry order.
    pub async fn agent_statuses(&self) -> Vec<(&AgentDescriptor, bool)> {
        let mut out = Vec::with_capacity(self.registry.list_all().len());
        for agent in self.registry.list_all() {
            out.push((agent, self.checker.is_installed(agent.binary).await));
        }
        out
    }

    pub async fn agent_versions(&self) -> Vec<(&AgentDescriptor, VersionStatus)> {
        let mut out = Vec::with_capacity(self.registry.list_all().len());
        for agent in self.registry.list_all() {
            out.push((agent, self.checker.version(agent).await));
        }
        out
    }
}

pub fn validate_request(req: &InvocationRequest) -> Result<()> {
    validate_task(&req.task)?;
    if req.parallel == 0 {
        return Err(OrchestraError::InvalidParallel(req.parallel));
    }
    Ok(())
}

pub fn validate_task(task: &str) -> Result<()> {
    if task.trim().is_empty() {
        return Err(OrchestraError::EmptyTask);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_task_requires_content() {
        assert!(validate_task("hi").is_ok());
        assert!(validate_task("").is_err());
        assert!(validate_task("   ").is_err());
    }

    #[test]
    fn validate_request_passes_repo_through() {
        let mut req = InvocationRequest::new("jules", "task");
        req.repo = Some("https://github.com/o/r".into());
        assert!(validate_request(&req).is_ok());
    }

    #[test]
    fn validate_request_rejects_zero_parallel() {
        let mut req = InvocationRequest::new("jules", "task");
        req.parallel = 0;
        assert!(matches!(
            validate_request(&req),
            Err(OrchestraError::InvalidParallel(0))
        ));
    }

    #[test]
    fn resolve_unknown_lists_available() {
        let orchestra = Orchestra::system(DispatchSettings::default());
        match orchestra.resolve("codex") {
            Err(OrchestraError::UnknownAgent { key, available }) => {
                assert_eq!(key, "codex");
                assert_eq!(available, "claude, gemini, jules");
            }
            other => panic!("unexpected: {:?}", other.map(|a| a.key)),
        }
    }
}
