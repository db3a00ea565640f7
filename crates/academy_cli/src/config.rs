//! Server configuration from flags and environment.
//!
//! Flags win over environment variables; both fall back to the defaults
//! below.

use clap::Parser;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Command-line arguments for the academy server
#[derive(Parser, Debug, Clone)]
#[command(name = "academy")]
#[command(about = "Youth sports academy enrollment server")]
#[command(version)]
pub struct ServerArgs {
    /// SQLite database file
    #[arg(long, env = "ACADEMY_DB_PATH", value_name = "FILE", default_value = "academy.sqlite3")]
    pub db_path: PathBuf,

    /// Listen address
    #[arg(long, env = "ACADEMY_BIND", value_name = "ADDR", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Log level (trace|debug|info|warn|error); defaults per build mode
    #[arg(long, env = "ACADEMY_LOG_LEVEL", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Directory for rolling log files
    #[arg(long, env = "ACADEMY_LOG_DIR", value_name = "DIR", default_value = "logs")]
    pub log_dir: PathBuf,
}

impl ServerArgs {
    pub fn effective_log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or(academy_core::default_log_level())
    }

    /// Log directory as an absolute path, resolved against `cwd` when relative.
    pub fn absolute_log_dir(&self, cwd: &Path) -> PathBuf {
        if self.log_dir.is_absolute() {
            self.log_dir.clone()
        } else {
            cwd.join(&self.log_dir)
        }
    }
}
