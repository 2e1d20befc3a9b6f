use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::rc::Rc;

use chrono::{TimeZone, Utc};
use loadlink_domain::{Link, RecordKind, Thumbnail};

use crate::{
    ApplicationError, DestinationStore, DestinationTransaction, InsertOutcome, SourceStore,
    StagedDocument, StagedDocuments, StagingArea, WriteOutcome,
};

pub fn sample_link(uid: &str) -> Link {
    Link {
        uid: uid.to_string(),
        path: format!("/f/{uid}.png"),
        name: uid.to_string(),
        ext: "png".to_string(),
        mime: "image/png".to_string(),
        date: Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .expect("valid date"),
    }
}

pub fn sample_thumbnail(uid: &str) -> Thumbnail {
    Thumbnail {
        uid: uid.to_string(),
        data: (0..=255).collect(),
        mime: "image/jpeg".to_string(),
        width: 256,
        height: 154,
    }
}

#[derive(Default)]
pub struct FakeSource {
    pub links: Vec<Link>,
    pub thumbnails: Vec<Thumbnail>,
    pub fail_thumbnail_scan: bool,
}

impl SourceStore for FakeSource {
    fn scan_links(
        &self,
        visit: &mut dyn FnMut(Link) -> Result<(), ApplicationError>,
    ) -> Result<(), ApplicationError> {
        for link in self.links.iter().cloned() {
            visit(link)?;
        }
        Ok(())
    }

    fn scan_thumbnails(
        &self,
        visit: &mut dyn FnMut(Thumbnail) -> Result<(), ApplicationError>,
    ) -> Result<(), ApplicationError> {
        if self.fail_thumbnail_scan {
            return Err(ApplicationError::Data(
                "thumbnails: column width is not an integer".to_string(),
            ));
        }
        for thumbnail in self.thumbnails.iter().cloned() {
            visit(thumbnail)?;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeStaging {
    pub prepared: RefCell<Vec<RecordKind>>,
    pub documents: RefCell<BTreeMap<(&'static str, String), Vec<u8>>>,
    pub missing: RefCell<Vec<RecordKind>>,
}

impl FakeStaging {
    pub fn uids(&self, kind: RecordKind) -> Vec<String> {
        self.documents
            .borrow()
            .keys()
            .filter(|(dir, _)| *dir == kind.dir_name())
            .map(|(_, uid)| uid.clone())
            .collect()
    }

    pub fn put_raw(&self, kind: RecordKind, uid: &str, contents: &[u8]) {
        self.documents
            .borrow_mut()
            .insert((kind.dir_name(), uid.to_string()), contents.to_vec());
    }
}

impl StagingArea for Rc<FakeStaging> {
    fn prepare(&self, kind: RecordKind) -> Result<(), ApplicationError> {
        self.prepared.borrow_mut().push(kind);
        Ok(())
    }

    fn write_document(
        &self,
        kind: RecordKind,
        uid: &str,
        contents: &[u8],
    ) -> Result<WriteOutcome, ApplicationError> {
        let previous = self
            .documents
            .borrow_mut()
            .insert((kind.dir_name(), uid.to_string()), contents.to_vec());
        Ok(match previous {
            Some(_) => WriteOutcome::Overwritten,
            None => WriteOutcome::Created,
        })
    }

    fn documents(&self, kind: RecordKind) -> StagedDocuments<'_> {
        if self.missing.borrow().contains(&kind) {
            return Box::new(std::iter::once(Err(ApplicationError::Io(format!(
                "{}: no such directory",
                kind.dir_name()
            )))));
        }

        let staged: Vec<Result<StagedDocument, ApplicationError>> = self
            .documents
            .borrow()
            .iter()
            .filter(|((dir, _), _)| *dir == kind.dir_name())
            .map(|((dir, uid), contents)| {
                Ok(StagedDocument {
                    path: PathBuf::from(format!("{dir}/{uid}.json")),
                    contents: contents.clone(),
                })
            })
            .collect();
        Box::new(staged.into_iter())
    }
}

#[derive(Default)]
pub struct FakeDestination {
    pub initialized: Cell<bool>,
    pub links: RefCell<Vec<Link>>,
    pub thumbnails: RefCell<Vec<Thumbnail>>,
    pub reject_uid: Option<String>,
}

impl DestinationStore for Rc<FakeDestination> {
    fn initialize(&self) -> Result<(), ApplicationError> {
        self.initialized.set(true);
        Ok(())
    }

    fn begin(&self) -> Result<Box<dyn DestinationTransaction + '_>, ApplicationError> {
        Ok(Box::new(FakeTransaction {
            store: self.as_ref(),
            links: RefCell::default(),
            thumbnails: RefCell::default(),
        }))
    }
}

struct FakeTransaction<'a> {
    store: &'a FakeDestination,
    links: RefCell<Vec<Link>>,
    thumbnails: RefCell<Vec<Thumbnail>>,
}

impl FakeTransaction<'_> {
    fn check_rejected(&self, uid: &str) -> Result<(), ApplicationError> {
        if self.store.reject_uid.as_deref() == Some(uid) {
            return Err(ApplicationError::Transaction(format!(
                "constraint failed for {uid}"
            )));
        }
        Ok(())
    }
}

impl DestinationTransaction for FakeTransaction<'_> {
    fn insert_link(&self, link: &Link) -> Result<InsertOutcome, ApplicationError> {
        self.check_rejected(&link.uid)?;
        let exists = self
            .store
            .links
            .borrow()
            .iter()
            .chain(self.links.borrow().iter())
            .any(|existing| existing.uid == link.uid);
        if exists {
            return Ok(InsertOutcome::Skipped);
        }
        self.links.borrow_mut().push(link.clone());
        Ok(InsertOutcome::Inserted)
    }

    fn insert_thumbnail(&self, thumbnail: &Thumbnail) -> Result<InsertOutcome, ApplicationError> {
        self.check_rejected(&thumbnail.uid)?;
        let exists = self
            .store
            .thumbnails
            .borrow()
            .iter()
            .chain(self.thumbnails.borrow().iter())
            .any(|existing| existing.uid == thumbnail.uid);
        if exists {
            return Ok(InsertOutcome::Skipped);
        }
        self.thumbnails.borrow_mut().push(thumbnail.clone());
        Ok(InsertOutcome::Inserted)
    }

    fn commit(self: Box<Self>) -> Result<(), ApplicationError> {
        self.store
            .links
            .borrow_mut()
            .extend(self.links.into_inner());
        self.store
            .thumbnails
            .borrow_mut()
            .extend(self.thumbnails.into_inner());
        Ok(())
    }
}
