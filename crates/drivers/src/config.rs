use std::path::PathBuf;

use loadlink_application::Verbosity;

use crate::cli::Cli;

pub const DEFAULT_SOURCE_DB: &str = "loadlink-source.sqlite3";
pub const DEFAULT_DESTINATION_DB: &str = "loadlink.sqlite3";
pub const DEFAULT_STAGING_DIR: &str = ".";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub source_db: PathBuf,
    pub destination_db: PathBuf,
    pub staging_dir: PathBuf,
    pub verbosity: Verbosity,
}

impl AppConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            source_db: cli.source_db.clone(),
            destination_db: cli.destination_db.clone(),
            staging_dir: cli.staging_dir.clone(),
            verbosity: Verbosity::from_flag(cli.verbose),
        }
    }
}
