use clap::Parser;
use orchestra::cli::{self, Cli};
use orchestra::config::appsettings::{self, AppSettings};
use orchestra::launcher::Orchestra;
use orchestra::{logging, util};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    if util::test_mode() {
        return ExitCode::SUCCESS;
    }

    let cli = Cli::parse();

    let (app_settings, load_error) = load_settings();
    logging::init(&app_settings.logging, cli.verbose);
    if let Some(err) = load_error {
        tracing::warn!(error = %format!("{:#}", err), "using default settings");
        eprintln!("Warning: {:#}; using default settings", err);
    }

    let orchestra = Orchestra::system(app_settings.dispatch);
    match cli::execute(&cli, &orchestra).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            cli::report_error(&err);
            ExitCode::from(exit_byte(err.exit_code()))
        }
    }
}

/// Settings never stop a command from running; problems are returned for
/// reporting and the defaults are used instead.
fn load_settings() -> (AppSettings, Option<anyhow::Error>) {
    let data_dir = match util::data_dir() {
        Ok(dir) => dir,
        Err(err) => return (AppSettings::default(), Some(err)),
    };
    let (app_settings, app_settings_path, err) =
        appsettings::load_app_settings_or_default(&data_dir);
    if err.is_none() && !app_settings_path.exists() {
        appsettings::save_app_settings(&data_dir, &app_settings).ok();
    }
    (app_settings, err)
}

/// Map an error's exit code onto a process status byte; anything that would
/// read as success or does not fit becomes 1.
fn exit_byte(code: i32) -> u8 {
    u8::try_from(code).ok().filter(|c| *c != 0).unwrap_or(1)
}
