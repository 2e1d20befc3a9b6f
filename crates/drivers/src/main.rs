mod cli;
mod config;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use cli::{Cli, Mode};
use config::AppConfig;
use loadlink_adapters::{
    present_export_report, present_import_report, FsStagingArea, SqliteDestinationStore,
    SqliteSourceStore,
};
use loadlink_application::{ApplicationError, ExportCommand, Exporter, ImportCommand, Importer};
use tracing::info;

fn main() -> ExitCode {
    // Usage errors exit with status 2 here, before any store is opened.
    let cli = Cli::parse();
    let config = AppConfig::from_cli(&cli);
    if let Err(error) = logging::init_logging(config.verbosity) {
        eprintln!("warning: logging disabled: {error}");
    }

    match run(cli.mode(), &config) {
        Ok(summary) => {
            println!("{summary}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(1)
        }
    }
}

fn run(mode: Mode, config: &AppConfig) -> Result<String, ApplicationError> {
    match mode {
        Mode::Export => {
            info!(
                source = %config.source_db.display(),
                staging = %config.staging_dir.display(),
                "dumping source records to staging"
            );
            let exporter = Exporter::new(
                Box::new(SqliteSourceStore::open(&config.source_db)?),
                Box::new(FsStagingArea::new(&config.staging_dir)),
                config.verbosity,
            );
            let report = exporter.export(ExportCommand)?;
            Ok(present_export_report(&report))
        }
        Mode::Import => {
            info!(
                staging = %config.staging_dir.display(),
                destination = %config.destination_db.display(),
                "restoring staged records to destination"
            );
            let importer = Importer::new(
                Box::new(FsStagingArea::new(&config.staging_dir)),
                Box::new(SqliteDestinationStore::open(&config.destination_db)?),
                config.verbosity,
            );
            let report = importer.import(ImportCommand)?;
            Ok(present_import_report(&report))
        }
    }
}
