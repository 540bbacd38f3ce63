use crate::agents::{AgentDescriptor, AgentKind, InvocationRequest};
use crate::error::{OrchestraError, Result};
use crate::launcher::Orchestra;
use crate::probe::VersionStatus;
use clap::{ArgAction, Parser, Subcommand};
use crossterm::style::{Color, Stylize};

#[derive(Parser, Debug)]
#[command(
    name = "orchestra",
    version,
    about = "Orchestrate multiple AI coding agents"
)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List available agents and their status
    Agents,

    /// Show versions of installed agents
    Status,

    /// Run a task with a specific agent
    Run {
        /// Agent to use (claude, gemini, jules)
        agent: String,

        /// Task description
        task: String,

        /// Auto-approve all actions (gemini only)
        #[arg(short, long)]
        yolo: bool,

        /// GitHub repo for Jules (owner/repo)
        #[arg(short, long)]
        repo: Option<String>,

        /// Number of parallel Jules sessions
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        parallel: u32,
    },

    /// Dispatch a task to an agent based on task type
    Dispatch {
        /// Task description
        task: String,

        /// Agent for synchronous work [default: from settings, gemini]
        #[arg(long = "sync", value_name = "AGENT")]
        sync_agent: Option<String>,

        /// Agent for asynchronous work [default: from settings, jules]
        #[arg(long = "async", value_name = "AGENT")]
        async_agent: Option<String>,

        /// GitHub repo for async tasks (owner/repo)
        #[arg(short, long)]
        repo: Option<String>,
    },

    /// List and manage Jules sessions
    Sessions {
        /// List all sessions
        #[arg(short, long)]
        list: bool,

        /// Pull a session's results
        #[arg(short, long, value_name = "ID")]
        pull: Option<String>,

        /// Apply the patch when pulling
        #[arg(short, long)]
        apply: bool,
    },
}

fn agent_color(agent: &AgentDescriptor) -> Color {
    Color::Rgb {
        r: agent.color.r,
        g: agent.color.g,
        b: agent.color.b,
    }
}

pub fn render_agent_list(statuses: &[(&AgentDescriptor, bool)]) -> String {
    let mut out = format!("\n{}\n\n", "Available Agents:".bold());
    for (agent, installed) in statuses {
        let status = if *installed {
            "✓ installed".green()
        } else {
            "✗ not found".red()
        };
        let kind = match agent.kind {
            AgentKind::Sync => "[sync]".blue(),
            AgentKind::Async => "[async]".yellow(),
        };
        let key = format!("{:<10}", agent.key).bold().with(agent_color(agent));
        out.push_str(&format!("  {} {} {}\n", key, kind, status));
        out.push_str(&format!("  {}\n\n", agent.description.dark_grey()));
    }
    out
}

pub fn render_versions(versions: &[(&AgentDescriptor, VersionStatus)]) -> String {
    let mut out = format!("\n{}\n\n", "Agent Status:".bold());
    for (agent, status) in versions {
        let text = status.to_string();
        let styled = match status {
            VersionStatus::Version(_) | VersionStatus::Installed => text.green(),
            VersionStatus::Error | VersionStatus::NotFound => text.red(),
        };
        out.push_str(&format!("  {} {}\n", format!("{:<10}", agent.key).bold(), styled));
    }
    out
}

/// Print a failure the way the user should see it.
pub fn report_error(err: &OrchestraError) {
    eprintln!("{}", err.to_string().red());
    if let OrchestraError::UnknownAgent { available, .. } = err {
        println!("Available: {}", available);
    }
}

pub async fn execute(cli: &Cli, orchestra: &Orchestra) -> Result<()> {
    match &cli.command {
        Command::Agents => {
            let statuses = orchestra.agent_statuses().await;
            print!("{}", render_agent_list(&statuses));
        }
        Command::Status => {
            let versions = orchestra.agent_versions().await;
            println!("{}", render_versions(&versions));
        }
        Command::Run {
            agent,
            task,
            yolo,
            repo,
            parallel,
        } => {
            let descriptor = orchestra.resolve(agent)?;
            println!(
                "\n{}\n",
                format!("Delegating to {}...", descriptor.display_name).bold()
            );
            let req = InvocationRequest {
                agent: agent.clone(),
                task: task.clone(),
                repo: repo.clone(),
                parallel: *parallel,
                auto_approve: *yolo,
            };
            orchestra.run(&req).await?;
        }
        Command::Dispatch {
            task,
            sync_agent,
            async_agent,
            repo,
        } => {
            println!("\n{}\n", "Analyzing task for dispatch...".bold());
            orchestra
                .dispatch(
                    task,
                    sync_agent.as_deref(),
                    async_agent.as_deref(),
                    repo.as_deref(),
                )
                .await?;
        }
        Command::Sessions { list: _, pull, apply } => match pull {
            Some(id) => orchestra.pull_session(id, *apply).await?,
            None => orchestra.list_sessions().await?,
        },
    }
    Ok(())
}
