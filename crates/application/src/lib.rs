mod codec;
mod error;
mod export;
#[cfg(test)]
mod fakes;
mod import;
mod ports;
mod use_cases;
mod verbosity;

pub use codec::{decode_document, encode_document};
pub use error::ApplicationError;
pub use export::Exporter;
pub use import::Importer;
pub use ports::{
    DestinationStore, DestinationTransaction, InsertOutcome, SourceStore, StagedDocument,
    StagedDocuments, StagingArea, WriteOutcome,
};
pub use use_cases::{ExportCommand, ImportCommand};
pub use verbosity::Verbosity;
