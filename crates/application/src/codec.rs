use loadlink_domain::Record;

use crate::{ApplicationError, StagedDocument};

pub fn encode_document<R: Record>(record: &R) -> Result<Vec<u8>, ApplicationError> {
    let mut bytes = serde_json::to_vec_pretty(record).map_err(|error| {
        ApplicationError::Data(format!(
            "failed to encode {} {:?}: {error}",
            R::KIND,
            record.uid()
        ))
    })?;
    bytes.push(b'\n');
    Ok(bytes)
}

pub fn decode_document<R: Record>(document: &StagedDocument) -> Result<R, ApplicationError> {
    serde_json::from_slice(&document.contents).map_err(|error| {
        ApplicationError::Data(format!(
            "malformed {} document {}: {error}",
            R::KIND,
            document.path.display()
        ))
    })
}
