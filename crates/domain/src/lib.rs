mod error;
mod record;
mod report;

pub use error::DomainError;
pub use record::{validate_uid, Link, Record, RecordKind, Thumbnail};
pub use report::{ExportReport, ImportPhase, ImportReport, KindExportReport, KindImportReport};
