use loadlink_domain::{ExportReport, ImportReport, RecordKind};

pub fn present_export_report(report: &ExportReport) -> String {
    RecordKind::ALL
        .iter()
        .map(|kind| {
            let counts = report.for_kind(*kind);
            format!(
                "exported {}: written={}, overwritten={}",
                kind.dir_name(),
                counts.written,
                counts.overwritten
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn present_import_report(report: &ImportReport) -> String {
    RecordKind::ALL
        .iter()
        .map(|kind| {
            let counts = report.for_kind(*kind);
            format!(
                "imported {}: inserted={}, skipped={}",
                kind.dir_name(),
                counts.inserted,
                counts.skipped
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
