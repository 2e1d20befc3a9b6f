pub mod fs;
pub mod migrations;
pub mod presenters;
pub mod sqlite;

pub use fs::{FsStagingArea, StagedFiles};
pub use presenters::{present_export_report, present_import_report};
pub use sqlite::{SqliteDestinationStore, SqliteSourceStore};
