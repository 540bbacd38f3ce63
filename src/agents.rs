use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    Sync,
    Async,
}

impl AgentKind {
    pub fn label(self) -> &'static str {
        match self {
            AgentKind::Sync => "sync",
            AgentKind::Async => "async",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How an agent expects its task on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgStyle {
    /// `-p <task>`
    PrintFlag,
    /// `[-y] <task>`
    Positional,
    /// `new [--repo r] [--parallel n] <task>`
    RemoteSession,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentDescriptor {
    pub key: &'static str,
    pub display_name: &'static str,
    pub binary: &'static str,
    pub kind: AgentKind,
    pub description: &'static str,
    pub version_arg: &'static str,
    pub style: ArgStyle,
    pub color: RgbColor,
}

/// One task handed to an agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    pub agent: String,
    pub task: String,
    pub repo: Option<String>,
    pub parallel: u32,
    pub auto_approve: bool,
}

impl InvocationRequest {
    pub fn new(agent: &str, task: &str) -> Self {
        InvocationRequest {
            agent: agent.to_string(),
            task: task.to_string(),
            repo: None,
            parallel: 1,
            auto_approve: false,
        }
    }
}

/// Known agents in declaration order. Built once at startup and handed
/// around by reference.
#[derive(Debug, Clone)]
pub struct Registry {
    agents: Vec<AgentDescriptor>,
}

impl Registry {
    pub fn builtin() -> Self {
        Registry {
            agents: vec![
                AgentDescriptor {
                    key: "claude",
                    display_name: "Claude Code",
                    binary: "claude",
                    kind: AgentKind::Sync,
                    description: "Anthropic's interactive coding assistant",
                    version_arg: "--version",
                    style: ArgStyle::PrintFlag,
                    color: RgbColor { r: 210, g: 180, b: 140 },
                },
                AgentDescriptor {
                    key: "gemini",
                    display_name: "Gemini CLI",
                    binary: "gemini",
                    kind: AgentKind::Sync,
                    description: "Google's interactive coding assistant",
                    version_arg: "--version",
                    style: ArgStyle::Positional,
                    color: RgbColor { r: 66, g: 133, b: 244 },
                },
                AgentDescriptor {
                    key: "jules",
                    display_name: "Jules",
                    binary: "jules",
                    kind: AgentKind::Async,
                    description: "Google's asynchronous coding agent",
                    version_arg: "version",
                    style: ArgStyle::RemoteSession,
                    color: RgbColor { r: 255, g: 140, b: 0 },
                },
            ],
        }
    }

    pub fn lookup(&self, key: &str) -> Option<&AgentDescriptor> {
        self.agents.iter().find(|a| a.key == key)
    }

    pub fn list_all(&self) -> &[AgentDescriptor] {
        &self.agents
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.agents.iter().map(|a| a.key).collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::builtin()
    }
}

pub fn format_agents(list: &[&str]) -> String {
    list.join(", ")
}

pub fn claude_args(task: &str) -> Vec<String> {
    vec!["-p".to_string(), task.to_string()]
}

pub fn gemini_args(task: &str, yolo: bool) -> Vec<String> {
    let mut args = Vec::with_capacity(2);
    if yolo {
        args.push("-y".to_string());
    }
    args.push(task.to_string());
    args
}

/// The repo flag is only added when a repo is given; whether one is
/// required is decided by the caller.
pub fn jules_args(task: &str, repo: Option<&str>, parallel: u32) -> Vec<String> {
    let mut args = vec!["new".to_string()];
    if let Some(repo) = repo {
        args.push("--repo".to_string());
        args.push(repo.to_string());
    }
    if parallel > 1 {
        args.push("--parallel".to_string());
        args.push(parallel.to_string());
    }
    args.push(task.to_string());
    args
}

pub fn session_list_args() -> Vec<String> {
    vec!["remote".into(), "list".into(), "--session".into()]
}

pub fn session_pull_args(id: &str, apply: bool) -> Vec<String> {
    let mut args = vec![
        "remote".to_string(),
        "pull".to_string(),
        "--session".to_string(),
        id.to_string(),
    ];
    if apply {
        args.push("--apply".to_string());
    }
    args
}

/// Pick the builder matching the agent's style. Options the agent does not
/// understand are dropped.
pub fn build_args(agent: &AgentDescriptor, req: &InvocationRequest) -> Vec<String> {
    match agent.style {
        ArgStyle::PrintFlag => claude_args(&req.task),
        ArgStyle::Positional => gemini_args(&req.task, req.auto_approve),
        ArgStyle::RemoteSession => jules_args(&req.task, req.repo.as_deref(), req.parallel),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_returns_matching_key() {
        let reg = Registry::builtin();
        for key in reg.keys() {
            assert_eq!(reg.lookup(key).map(|a| a.key), Some(key));
        }
        assert!(reg.lookup("codex").is_none());
        assert!(reg.lookup("").is_none());
    }

    #[test]
    fn registry_keeps_declaration_order() {
        let reg = Registry::builtin();
        assert_eq!(reg.keys(), vec!["claude", "gemini", "jules"]);
        assert_eq!(format_agents(&reg.keys()), "claude, gemini, jules");
    }

    #[test]
    fn only_jules_is_async() {
        let reg = Registry::builtin();
        let kinds: Vec<AgentKind> = reg.list_all().iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![AgentKind::Sync, AgentKind::Sync, AgentKind::Async]);
        assert_eq!(reg.lookup("jules").unwrap().version_arg, "version");
        assert_eq!(reg.lookup("claude").unwrap().version_arg, "--version");
    }

    #[test]
    fn claude_args_use_print_flag() {
        assert_eq!(claude_args("test task"), vec!["-p", "test task"]);
    }

    #[test]
    fn gemini_args_respect_yolo() {
        assert_eq!(gemini_args("test task", false), vec!["test task"]);
        assert_eq!(gemini_args("test task", true), vec!["-y", "test task"]);
    }

    #[test]
    fn jules_args_with_repo_and_parallel() {
        assert_eq!(
            jules_args("test task", Some("owner/repo"), 2),
            vec!["new", "--repo", "owner/repo", "--parallel", "2", "test task"]
        );
    }

    #[test]
    fn jules_args_minimal() {
        assert_eq!(jules_args("test task", None, 1), vec!["new", "test task"]);
        assert_eq!(
            jules_args("test task", None, 4),
            vec!["new", "--parallel", "4", "test task"]
        );
    }

    #[test]
    fn session_pull_appends_apply() {
        assert_eq!(
            session_pull_args("123", false),
            vec!["remote", "pull", "--session", "123"]
        );
        assert_eq!(
            session_pull_args("123", true),
            vec!["remote", "pull", "--session", "123", "--apply"]
        );
        assert_eq!(session_list_args(), vec!["remote", "list", "--session"]);
    }

    #[test]
    fn build_args_ignores_foreign_options() {
        let reg = Registry::builtin();
        let mut req = InvocationRequest::new("claude", "test task");
        req.auto_approve = true;
        req.repo = Some("owner/repo".into());
        req.parallel = 3;

        assert_eq!(
            build_args(reg.lookup("claude").unwrap(), &req),
            vec!["-p", "test task"]
        );
        assert_eq!(
            build_args(reg.lookup("gemini").unwrap(), &req),
            vec!["-y", "test task"]
        );
        assert_eq!(
            build_args(reg.lookup("jules").unwrap(), &req),
            vec!["new", "--repo", "owner/repo", "--parallel", "3", "test task"]
        );
    }
}
