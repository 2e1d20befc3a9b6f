use std::path::PathBuf;

use clap::{ArgGroup, Parser};

use crate::config::{DEFAULT_DESTINATION_DB, DEFAULT_SOURCE_DB, DEFAULT_STAGING_DIR};

/// Moves link and thumbnail records between SQLite stores through a tree of
/// one-file-per-record JSON documents.
#[derive(Debug, Parser)]
#[command(name = "loadlink-migrate", version, about)]
#[command(group(ArgGroup::new("mode").required(true).args(["export", "import"])))]
pub struct Cli {
    /// Dump every source row into the staging directories
    #[arg(short = 'e', long, short_alias = 'd', alias = "dump")]
    pub export: bool,

    /// Restore the staging directories into the destination store
    #[arg(short = 'i', long, short_alias = 'r', alias = "restore")]
    pub import: bool,

    /// Log every record as it is processed
    #[arg(short, long)]
    pub verbose: bool,

    /// SQLite database records are exported from
    #[arg(long, env = "LOADLINK_SOURCE_DB", default_value = DEFAULT_SOURCE_DB)]
    pub source_db: PathBuf,

    /// SQLite database records are imported into
    #[arg(long, env = "LOADLINK_DESTINATION_DB", default_value = DEFAULT_DESTINATION_DB)]
    pub destination_db: PathBuf,

    /// Directory holding the `links/` and `thumbnails/` staging directories
    #[arg(long, env = "LOADLINK_STAGING_DIR", default_value = DEFAULT_STAGING_DIR)]
    pub staging_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Export,
    Import,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.export {
            Mode::Export
        } else {
            Mode::Import
        }
    }
}
