use std::fmt::{Display, Formatter};

use crate::RecordKind;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindExportReport {
    pub written: usize,
    /// Subset of `written` that replaced a file left by an earlier run.
    pub overwritten: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub links: KindExportReport,
    pub thumbnails: KindExportReport,
}

impl ExportReport {
    pub fn for_kind(&self, kind: RecordKind) -> &KindExportReport {
        match kind {
            RecordKind::Link => &self.links,
            RecordKind::Thumbnail => &self.thumbnails,
        }
    }

    pub fn for_kind_mut(&mut self, kind: RecordKind) -> &mut KindExportReport {
        match kind {
            RecordKind::Link => &mut self.links,
            RecordKind::Thumbnail => &mut self.thumbnails,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindImportReport {
    pub inserted: usize,
    /// Documents whose uid already existed at the destination.
    pub skipped: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub links: KindImportReport,
    pub thumbnails: KindImportReport,
}

impl ImportReport {
    pub fn for_kind(&self, kind: RecordKind) -> &KindImportReport {
        match kind {
            RecordKind::Link => &self.links,
            RecordKind::Thumbnail => &self.thumbnails,
        }
    }

    pub fn for_kind_mut(&mut self, kind: RecordKind) -> &mut KindImportReport {
        match kind {
            RecordKind::Link => &mut self.links,
            RecordKind::Thumbnail => &mut self.thumbnails,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportPhase {
    Idle,
    WalkingLinks,
    WalkingThumbnails,
    Committing,
    Committed,
    RolledBack,
}

impl ImportPhase {
    pub fn walking(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Link => Self::WalkingLinks,
            RecordKind::Thumbnail => Self::WalkingThumbnails,
        }
    }
}

impl Display for ImportPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::WalkingLinks => "walking-links",
            Self::WalkingThumbnails => "walking-thumbnails",
            Self::Committing => "committing",
            Self::Committed => "committed",
            Self::RolledBack => "rolled-back",
        };
        f.write_str(name)
    }
}
