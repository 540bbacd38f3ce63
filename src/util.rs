use anyhow::Result;
use std::env;
use std::path::PathBuf;

pub const HOME_ENV: &str = "ORCHESTRA_HOME";
pub const TEST_MODE_ENV: &str = "ORCHESTRA_TEST_MODE";

/// Return the platform-appropriate data directory for orchestra.
/// - `$ORCHESTRA_HOME` when set
/// - macOS: ~/.orchestra
/// - Linux: ~/.local/share/orchestra (or $XDG_DATA_HOME/orchestra)
/// - Windows: %APPDATA%\\Orchestra
pub fn data_dir() -> Result<PathBuf> {
    if let Ok(home) = env::var(HOME_ENV) {
        if !home.is_empty() {
            return Ok(PathBuf::from(home));
        }
    }

    let os = env::consts::OS;
    let base = match os {
        "macos" => dirs_home().map(|h| h.join(".orchestra")),
        "windows" => {
            if let Ok(appdata) = env::var("APPDATA") {
                Some(PathBuf::from(appdata).join("Orchestra"))
            } else {
                dirs_home().map(|h| h.join("AppData").join("Roaming").join("Orchestra"))
            }
        }
        _ => {
            if let Ok(xdg) = env::var("XDG_DATA_HOME") {
                Some(PathBuf::from(xdg).join("orchestra"))
            } else {
                dirs_home().map(|h| h.join(".local").join("share").join("orchestra"))
            }
        }
    };

    base.ok_or_else(|| anyhow::anyhow!("could not resolve home directory"))
}

fn dirs_home() -> Option<PathBuf> {
    dirs::home_dir()
}

/// True when the binary should not parse its own arguments.
pub fn test_mode() -> bool {
    env::var_os(TEST_MODE_ENV).is_some()
}

/// Quote one word for a POSIX shell.
pub fn shell_quote(word: &str) -> String {
    format!("'{}'", word.replace('\'', "'\\''"))
}

/// Build a shell command line where every argument stays a single word.
pub fn shell_line(program: &str, args: &[String]) -> String {
    let mut parts = Vec::with_capacity(args.len() + 1);
    parts.push(shell_quote(program));
    parts.extend(args.iter().map(|a| shell_quote(a)));
    parts.join(" ")
}

/// Human-readable form of a command for echoing before it runs.
pub fn display_command(program: &str, args: &[String]) -> String {
    let mut parts = vec![program.to_string()];
    for arg in args {
        if arg.is_empty() || arg.contains(char::is_whitespace) {
            parts.push(format!("\"{}\"", arg));
        } else {
            parts.push(arg.clone());
        }
    }
    parts.join(" ")
}
