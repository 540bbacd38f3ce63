//! Orchestra - hand coding tasks to external AI coding agents.
//!
//! This library provides the core functionality for the orchestra CLI tool.

pub mod agents;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod launcher;
pub mod logging;
pub mod probe;
pub mod process;
pub mod util;
