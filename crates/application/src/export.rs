use loadlink_domain::{
    validate_uid, ExportReport, KindExportReport, Link, Record, RecordKind, Thumbnail,
};
use tracing::{debug, info};

use crate::{
    encode_document, ApplicationError, ExportCommand, SourceStore, StagingArea, Verbosity,
    WriteOutcome,
};

/// Dumps every source row into the staging area, one document per record.
pub struct Exporter {
    source: Box<dyn SourceStore>,
    staging: Box<dyn StagingArea>,
    verbosity: Verbosity,
}

impl Exporter {
    pub fn new(
        source: Box<dyn SourceStore>,
        staging: Box<dyn StagingArea>,
        verbosity: Verbosity,
    ) -> Self {
        Self {
            source,
            staging,
            verbosity,
        }
    }

    /// Links are fully written before thumbnails start. Rows are taken in
    /// the order the source returns them, so nothing downstream may rely on
    /// document order.
    ///
    /// Files already written stay on disk when a later row fails, and files
    /// for rows no longer in the source are never removed.
    pub fn export(&self, _command: ExportCommand) -> Result<ExportReport, ApplicationError> {
        let mut report = ExportReport::default();
        self.export_kind::<Link>(report.for_kind_mut(RecordKind::Link))?;
        self.export_kind::<Thumbnail>(report.for_kind_mut(RecordKind::Thumbnail))?;

        info!(
            links = report.links.written,
            thumbnails = report.thumbnails.written,
            "export finished"
        );
        Ok(report)
    }

    fn export_kind<R: Exportable>(
        &self,
        counts: &mut KindExportReport,
    ) -> Result<(), ApplicationError> {
        let kind = R::KIND;
        self.staging.prepare(kind)?;
        info!(%kind, "exporting records");

        R::scan(self.source.as_ref(), &mut |record: R| {
            validate_uid(record.uid())?;
            if self.verbosity.is_verbose() {
                debug!(%kind, uid = record.uid(), "dumping record");
            }

            let document = encode_document(&record)?;
            let outcome = self
                .staging
                .write_document(kind, record.uid(), &document)?;

            counts.written += 1;
            if outcome == WriteOutcome::Overwritten {
                counts.overwritten += 1;
                if self.verbosity.is_verbose() {
                    debug!(%kind, uid = record.uid(), "replaced stale document");
                }
            }
            Ok(())
        })
    }
}

trait Exportable: Record {
    fn scan(
        source: &dyn SourceStore,
        visit: &mut dyn FnMut(Self) -> Result<(), ApplicationError>,
    ) -> Result<(), ApplicationError>;
}

impl Exportable for Link {
    fn scan(
        source: &dyn SourceStore,
        visit: &mut dyn FnMut(Self) -> Result<(), ApplicationError>,
    ) -> Result<(), ApplicationError> {
        source.scan_links(visit)
    }
}

impl Exportable for Thumbnail {
    fn scan(
        source: &dyn SourceStore,
        visit: &mut dyn FnMut(Self) -> Result<(), ApplicationError>,
    ) -> Result<(), ApplicationError> {
        source.scan_thumbnails(visit)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use loadlink_domain::DomainError;

    use super::*;
    use crate::fakes::{sample_link, sample_thumbnail, FakeSource, FakeStaging};

    fn exporter(source: FakeSource, staging: &Rc<FakeStaging>) -> Exporter {
        Exporter::new(
            Box::new(source),
            Box::new(Rc::clone(staging)),
            Verbosity::Verbose,
        )
    }

    #[test]
    fn writes_one_document_per_row() {
        let staging = Rc::new(FakeStaging::default());
        let source = FakeSource {
            links: vec![sample_link("a1"), sample_link("a2")],
            thumbnails: vec![sample_thumbnail("t1")],
            ..FakeSource::default()
        };

        let report = exporter(source, &staging)
            .export(ExportCommand)
            .expect("export should work");

        assert_eq!(report.links.written, 2);
        assert_eq!(report.thumbnails.written, 1);
        assert_eq!(report.links.overwritten, 0);
        assert_eq!(staging.uids(RecordKind::Link), vec!["a1", "a2"]);
        assert_eq!(staging.uids(RecordKind::Thumbnail), vec!["t1"]);
        assert_eq!(
            staging.prepared.borrow().as_slice(),
            &[RecordKind::Link, RecordKind::Thumbnail]
        );
    }

    #[test]
    fn second_export_reports_overwrites() {
        let staging = Rc::new(FakeStaging::default());
        let source = || FakeSource {
            links: vec![sample_link("a1")],
            thumbnails: vec![sample_thumbnail("t1"), sample_thumbnail("t2")],
            ..FakeSource::default()
        };

        exporter(source(), &staging)
            .export(ExportCommand)
            .expect("first export");
        let report = exporter(source(), &staging)
            .export(ExportCommand)
            .expect("second export");

        assert_eq!(report.links.written, 1);
        assert_eq!(report.links.overwritten, 1);
        assert_eq!(report.thumbnails.overwritten, 2);
        assert_eq!(staging.uids(RecordKind::Thumbnail).len(), 2);
    }

    #[test]
    fn thumbnail_failure_keeps_written_links() {
        let staging = Rc::new(FakeStaging::default());
        let source = FakeSource {
            links: vec![sample_link("a1")],
            thumbnails: vec![sample_thumbnail("t1")],
            fail_thumbnail_scan: true,
        };

        let result = exporter(source, &staging).export(ExportCommand);

        assert!(matches!(result, Err(ApplicationError::Data(_))));
        assert_eq!(staging.uids(RecordKind::Link), vec!["a1"]);
        assert!(staging.uids(RecordKind::Thumbnail).is_empty());
    }

    #[test]
    fn unsafe_uid_aborts_export() {
        let staging = Rc::new(FakeStaging::default());
        let source = FakeSource {
            links: vec![sample_link("ok"), sample_link("../escape"), sample_link("late")],
            ..FakeSource::default()
        };

        let result = exporter(source, &staging).export(ExportCommand);

        assert!(matches!(
            result,
            Err(ApplicationError::Domain(DomainError::UnsafeUid(_)))
        ));
        assert_eq!(staging.uids(RecordKind::Link), vec!["ok"]);
    }
}
