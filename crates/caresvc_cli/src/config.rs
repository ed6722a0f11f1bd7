//! CLI configuration resolved from flags and environment.
//!
//! # Invariants
//! - `data_dir` is always absolute; relative input is joined onto the
//!   current directory.

use anyhow::{bail, Context};
use clap::{Args, ValueEnum};
use std::path::PathBuf;

pub const DB_FILE_NAME: &str = "caresvc.sqlite3";
const DEFAULT_DIR_NAME: &str = "caresvc";
const LOG_DIR_NAME: &str = "logs";

/// Durable storage medium for the `services` slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// SQLite key-value table (`caresvc.sqlite3`).
    Sqlite,
    /// Plain JSON document (`services.json`).
    Json,
    /// Process memory only; nothing survives exit.
    Memory,
}

/// Flags shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Storage backend
    #[arg(long, global = true, value_enum, env = "CARESVC_BACKEND", default_value = "sqlite")]
    pub backend: Backend,

    /// Directory holding the database, JSON file and logs
    #[arg(long, global = true, env = "CARESVC_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, global = true, env = "CARESVC_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Disable file logging
    #[arg(long, global = true)]
    pub no_log: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub backend: Backend,
    pub data_dir: PathBuf,
    pub log_level: String,
    pub logging_enabled: bool,
}

impl AppConfig {
    pub fn resolve(args: &GlobalArgs) -> anyhow::Result<Self> {
        let data_dir = match &args.data_dir {
            Some(dir) if dir.as_os_str().is_empty() => bail!("--data-dir cannot be empty"),
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => std::env::current_dir()
                .context("cannot resolve relative data dir")?
                .join(dir),
            None => std::env::temp_dir().join(DEFAULT_DIR_NAME),
        };

        let log_level = args
            .log_level
            .as_deref()
            .map(str::trim)
            .filter(|level| !level.is_empty())
            .unwrap_or(caresvc_core::default_log_level())
            .to_string();

        Ok(Self {
            backend: args.backend,
            data_dir,
            log_level,
            logging_enabled: !args.no_log,
        })
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, Backend, GlobalArgs};
    use std::path::PathBuf;

    fn args(data_dir: Option<&str>) -> GlobalArgs {
        GlobalArgs {
            backend: Backend::Json,
            data_dir: data_dir.map(PathBuf::from),
            log_level: Some("  ".to_string()),
            no_log: true,
        }
    }

    #[test]
    fn relative_data_dir_becomes_absolute() {
        let config = AppConfig::resolve(&args(Some("state"))).unwrap();
        assert!(config.data_dir.is_absolute());
        assert!(config.data_dir.ends_with("state"));
    }

    #[test]
    fn blank_log_level_falls_back_to_build_default() {
        let config = AppConfig::resolve(&args(None)).unwrap();
        assert_eq!(config.log_level, caresvc_core::default_log_level());
        assert!(!config.logging_enabled);
        assert!(config.db_path().ends_with("caresvc/caresvc.sqlite3"));
    }

    #[test]
    fn empty_data_dir_is_rejected() {
        let err = AppConfig::resolve(&args(Some(""))).unwrap_err();
        assert_eq!(err.to_string(), "--data-dir cannot be empty");
    }
}
