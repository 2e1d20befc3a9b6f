use loadlink_domain::{
    ImportPhase, ImportReport, KindImportReport, Link, Record, RecordKind, Thumbnail,
};
use std::cell::Cell;

use tracing::{debug, info, warn};

use crate::{
    decode_document, ApplicationError, DestinationStore, DestinationTransaction, ImportCommand,
    InsertOutcome, StagingArea, Verbosity,
};

/// Loads staged documents into the destination inside one transaction.
pub struct Importer {
    staging: Box<dyn StagingArea>,
    destination: Box<dyn DestinationStore>,
    verbosity: Verbosity,
    phase: Cell<ImportPhase>,
}

impl Importer {
    pub fn new(
        staging: Box<dyn StagingArea>,
        destination: Box<dyn DestinationStore>,
        verbosity: Verbosity,
    ) -> Self {
        Self {
            staging,
            destination,
            verbosity,
            phase: Cell::new(ImportPhase::Idle),
        }
    }

    /// Where the most recent run stopped: `Committed` or `RolledBack` once an
    /// import has returned.
    pub fn phase(&self) -> ImportPhase {
        self.phase.get()
    }

    fn advance(&self, next: ImportPhase) {
        self.phase.set(next);
    }

    /// Either every staged record is visible at the destination afterwards
    /// or none from this run is. Records whose uid already exists are left
    /// as they are and counted as skipped.
    pub fn import(&self, _command: ImportCommand) -> Result<ImportReport, ApplicationError> {
        self.destination.initialize()?;

        self.phase.set(ImportPhase::Idle);
        let result = self.run();
        match &result {
            Ok(report) => info!(
                links_inserted = report.links.inserted,
                links_skipped = report.links.skipped,
                thumbnails_inserted = report.thumbnails.inserted,
                thumbnails_skipped = report.thumbnails.skipped,
                "import committed"
            ),
            Err(error) => {
                warn!(failed_in = %self.phase(), %error, "import aborted");
                self.advance(ImportPhase::RolledBack);
            }
        }
        result
    }

    fn run(&self) -> Result<ImportReport, ApplicationError> {
        let transaction = self.destination.begin()?;
        let mut report = ImportReport::default();

        self.advance(ImportPhase::walking(RecordKind::Link));
        self.import_kind::<Link>(
            transaction.as_ref(),
            report.for_kind_mut(RecordKind::Link),
        )?;

        self.advance(ImportPhase::walking(RecordKind::Thumbnail));
        self.import_kind::<Thumbnail>(
            transaction.as_ref(),
            report.for_kind_mut(RecordKind::Thumbnail),
        )?;

        self.advance(ImportPhase::Committing);
        transaction.commit()?;
        self.advance(ImportPhase::Committed);
        Ok(report)
    }

    fn import_kind<R: Insertable>(
        &self,
        transaction: &dyn DestinationTransaction,
        counts: &mut KindImportReport,
    ) -> Result<(), ApplicationError> {
        let kind = R::KIND;
        for document in self.staging.documents(kind) {
            let document = document?;
            if self.verbosity.is_verbose() {
                debug!(%kind, path = %document.path.display(), "restoring record");
            }

            let record: R = decode_document(&document)?;
            match record.insert(transaction)? {
                InsertOutcome::Inserted => counts.inserted += 1,
                InsertOutcome::Skipped => {
                    counts.skipped += 1;
                    if self.verbosity.is_verbose() {
                        debug!(%kind, uid = record.uid(), "already present, skipped");
                    }
                }
            }
        }
        Ok(())
    }
}


trait Insertable: Record {
    fn insert(
        &self,
        transaction: &dyn DestinationTransaction,
    ) -> Result<InsertOutcome, ApplicationError>;
}

impl Insertable for Link {
    fn insert(
        &self,
        transaction: &dyn DestinationTransaction,
    ) -> Result<InsertOutcome, ApplicationError> {
        transaction.insert_link(self)
    }
}

impl Insertable for Thumbnail {
    fn insert(
        &self,
        transaction: &dyn DestinationTransaction,
    ) -> Result<InsertOutcome, ApplicationError> {
        transaction.insert_thumbnail(self)
    }
}
