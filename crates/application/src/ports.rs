use std::path::PathBuf;

use loadlink_domain::{Link, RecordKind, Thumbnail};

use crate::ApplicationError;

/// Read-only access to the store records are exported from.
///
/// Scans visit every row of a table, one at a time, in whatever order the
/// store yields them. The first error returned by `visit` stops the scan and
/// is returned unchanged.
pub trait SourceStore {
    fn scan_links(
        &self,
        visit: &mut dyn FnMut(Link) -> Result<(), ApplicationError>,
    ) -> Result<(), ApplicationError>;

    fn scan_thumbnails(
        &self,
        visit: &mut dyn FnMut(Thumbnail) -> Result<(), ApplicationError>,
    ) -> Result<(), ApplicationError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Overwritten,
}

#[derive(Debug, Clone)]
pub struct StagedDocument {
    pub path: PathBuf,
    pub contents: Vec<u8>,
}

/// Lazy walk over one kind's staging directory.
///
/// Yields at most one `Err`; the sequence ends right after it.
pub type StagedDocuments<'a> =
    Box<dyn Iterator<Item = Result<StagedDocument, ApplicationError>> + 'a>;

pub trait StagingArea {
    /// Ensures the kind's directory exists. Calling it again is not an error.
    fn prepare(&self, kind: RecordKind) -> Result<(), ApplicationError>;

    fn write_document(
        &self,
        kind: RecordKind,
        uid: &str,
        contents: &[u8],
    ) -> Result<WriteOutcome, ApplicationError>;

    fn documents(&self, kind: RecordKind) -> StagedDocuments<'_>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    Skipped,
}

pub trait DestinationStore {
    fn initialize(&self) -> Result<(), ApplicationError>;

    /// Opens the single serializable transaction an import runs in.
    fn begin(&self) -> Result<Box<dyn DestinationTransaction + '_>, ApplicationError>;
}

/// Dropping a transaction without calling `commit` rolls it back.
pub trait DestinationTransaction {
    fn insert_link(&self, link: &Link) -> Result<InsertOutcome, ApplicationError>;

    fn insert_thumbnail(&self, thumbnail: &Thumbnail) -> Result<InsertOutcome, ApplicationError>;

    fn commit(self: Box<Self>) -> Result<(), ApplicationError>;
}
