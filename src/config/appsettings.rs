use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DispatchSettings {
    #[serde(default = "default_sync_agent")]
    pub sync_agent: String,
    #[serde(default = "default_async_agent")]
    pub async_agent: String,
    #[serde(default = "default_async_keywords")]
    pub async_keywords: Vec<String>,
}

fn default_sync_agent() -> String {
    "gemini".to_string()
}

fn default_async_agent() -> String {
    "jules".to_string()
}

fn default_async_keywords() -> Vec<String> {
    [
        "background",
        "later",
        "batch",
        "multiple",
        "parallel",
        "tests",
        "documentation",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for DispatchSettings {
    fn default() -> Self {
        DispatchSettings {
            sync_agent: default_sync_agent(),
            async_agent: default_async_agent(),
            async_keywords: default_async_keywords(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingSettings {
    /// trace, debug, info, warn, error or off
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppSettings {
    #[serde(default)]
    pub dispatch: DispatchSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

pub const APP_SETTINGS_FILE: &str = "orchestra.yaml";

pub fn default_app_settings() -> AppSettings {
    AppSettings::default()
}

pub fn load_app_settings(dir: &Path) -> Result<(AppSettings, PathBuf)> {
    let path = dir.join(APP_SETTINGS_FILE);
    if !path.exists() {
        return Ok((default_app_settings(), path));
    }

    let contents = fs::read_to_string(&path)
        .with_context(|| format!("failed reading app settings {}", path.display()))?;
    let mut settings: AppSettings = if contents.trim().is_empty() {
        default_app_settings()
    } else {
        serde_yaml::from_str(&contents)
            .with_context(|| format!("failed parsing app settings {}", path.display()))?
    };
    // Blank agent names fall back to defaults; an empty keyword list is kept.
    let defaults = default_app_settings();
    if settings.dispatch.sync_agent.trim().is_empty() {
        settings.dispatch.sync_agent = defaults.dispatch.sync_agent;
    }
    if settings.dispatch.async_agent.trim().is_empty() {
        settings.dispatch.async_agent = defaults.dispatch.async_agent;
    }
    if settings.logging.level.trim().is_empty() {
        settings.logging.level = defaults.logging.level;
    }
    Ok((settings, path))
}

/// Like [`load_app_settings`], but an unreadable or malformed file yields the
/// defaults together with the error so the caller can report it.
pub fn load_app_settings_or_default(dir: &Path) -> (AppSettings, PathBuf, Option<anyhow::Error>) {
    match load_app_settings(dir) {
        Ok((settings, path)) => (settings, path, None),
        Err(err) => (default_app_settings(), dir.join(APP_SETTINGS_FILE), Some(err)),
    }
}

pub fn save_app_settings(dir: &Path, settings: &AppSettings) -> Result<()> {
    let path = dir.join(APP_SETTINGS_FILE);
    let yaml = serde_yaml::to_string(settings)?;
    let header = "# Orchestra App Settings\n# This file is auto-generated. Edit carefully.\n\n";
    fs::create_dir_all(dir)?;
    fs::write(&path, format!("{}{}", header, yaml))
        .with_context(|| format!("failed writing {}", path.display()))?;
    Ok(())
}
