//! Server entry point.
//!
//! # Responsibility
//! - Parse configuration, start logging, open the database, serve HTTP.
//! - Exit non-zero with a one-line reason when any startup step fails.

mod config;

use academy_api::AppState;
use academy_core::db::open_db;
use clap::Parser;
use config::ServerArgs;
use log::{error, info};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = ServerArgs::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("event=app_exit module=cli status=error error={}", message);
            eprintln!("academy: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: ServerArgs) -> Result<(), String> {
    let cwd = std::env::current_dir()
        .map_err(|err| format!("cannot resolve current directory: {err}"))?;
    let log_dir = args.absolute_log_dir(&cwd);
    let log_dir = log_dir
        .to_str()
        .ok_or_else(|| format!("log dir `{}` is not valid UTF-8", log_dir.display()))?;
    academy_core::init_logging(args.effective_log_level(), log_dir)?;

    let conn = open_db(&args.db_path)
        .map_err(|err| format!("cannot open `{}`: {err}", args.db_path.display()))?;
    info!(
        "event=app_ready module=cli status=ok db_path={} bind={}",
        args.db_path.display(),
        args.bind
    );

    academy_api::serve(args.bind, AppState::new(conn))
        .await
        .map_err(|err| err.to_string())
}
