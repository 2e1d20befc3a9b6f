use std::fs;
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

use loadlink_application::{
    ApplicationError, StagedDocument, StagedDocuments, StagingArea, WriteOutcome,
};
use loadlink_domain::RecordKind;
use walkdir::WalkDir;

const STAGING_EXTENSION: &str = "json";

/// Staging tree rooted at a directory: `<root>/links/<uid>.json` and
/// `<root>/thumbnails/<uid>.json`.
#[derive(Debug, Clone)]
pub struct FsStagingArea {
    root: PathBuf,
}

impl FsStagingArea {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn kind_dir(&self, kind: RecordKind) -> PathBuf {
        self.root.join(kind.dir_name())
    }

    pub fn document_path(&self, kind: RecordKind, uid: &str) -> PathBuf {
        self.kind_dir(kind).join(format!("{uid}.{STAGING_EXTENSION}"))
    }
}

impl StagingArea for FsStagingArea {
    fn prepare(&self, kind: RecordKind) -> Result<(), ApplicationError> {
        let dir = self.kind_dir(kind);
        fs::create_dir_all(&dir).map_err(|error| {
            ApplicationError::Io(format!("failed to create {}: {error}", dir.display()))
        })
    }

    fn write_document(
        &self,
        kind: RecordKind,
        uid: &str,
        contents: &[u8],
    ) -> Result<WriteOutcome, ApplicationError> {
        let path = self.document_path(kind, uid);
        let outcome = if path.exists() {
            WriteOutcome::Overwritten
        } else {
            WriteOutcome::Created
        };

        fs::write(&path, contents).map_err(|error| {
            ApplicationError::Io(format!("failed to write {}: {error}", path.display()))
        })?;
        Ok(outcome)
    }

    fn documents(&self, kind: RecordKind) -> StagedDocuments<'_> {
        Box::new(StagedFiles::new(&self.kind_dir(kind)))
    }
}

/// Recursive walk over a staging directory that reads each non-directory
/// entry as it is pulled.
///
/// A missing or unreadable directory or file is reported once as an error,
/// after which the walk is over for good.
pub struct StagedFiles {
    state: WalkState,
}

enum WalkState {
    Walking(walkdir::IntoIter),
    Exhausted,
    Failed,
}

impl StagedFiles {
    pub fn new(dir: &Path) -> Self {
        Self {
            state: WalkState::Walking(WalkDir::new(dir).sort_by_file_name().into_iter()),
        }
    }

    #[cfg(test)]
    fn failed(&self) -> bool {
        matches!(self.state, WalkState::Failed)
    }

    fn fail(
        &mut self,
        error: ApplicationError,
    ) -> Option<Result<StagedDocument, ApplicationError>> {
        self.state = WalkState::Failed;
        Some(Err(error))
    }
}

impl Iterator for StagedFiles {
    type Item = Result<StagedDocument, ApplicationError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let WalkState::Walking(entries) = &mut self.state else {
                return None;
            };

            let entry = match entries.next() {
                None => {
                    self.state = WalkState::Exhausted;
                    return None;
                }
                Some(Err(error)) => {
                    return self.fail(ApplicationError::Io(format!(
                        "failed to walk staging directory: {error}"
                    )));
                }
                Some(Ok(entry)) => entry,
            };

            if entry.file_type().is_dir() {
                continue;
            }

            let path = entry.into_path();
            return match fs::read(&path) {
                Ok(contents) => Some(Ok(StagedDocument { path, contents })),
                Err(error) => self.fail(ApplicationError::Io(format!(
                    "failed to read {}: {error}",
                    path.display()
                ))),
            };
        }
    }
}

impl FusedIterator for StagedFiles {}
