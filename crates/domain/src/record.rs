use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Link,
    Thumbnail,
}

impl RecordKind {
    /// Export and import both process kinds in this order.
    pub const ALL: [RecordKind; 2] = [RecordKind::Link, RecordKind::Thumbnail];

    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Link => "links",
            Self::Thumbnail => "thumbnails",
        }
    }

    pub fn table_name(self) -> &'static str {
        match self {
            Self::Link => "links",
            Self::Thumbnail => "thumbnails",
        }
    }
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Link => write!(f, "link"),
            Self::Thumbnail => write!(f, "thumbnail"),
        }
    }
}

/// A flat row that can be staged as one document and keyed by `uid`.
pub trait Record: Serialize + DeserializeOwned {
    const KIND: RecordKind;

    fn uid(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub uid: String,
    pub path: String,
    pub name: String,
    pub ext: String,
    pub mime: String,
    pub date: DateTime<Utc>,
}

impl Record for Link {
    const KIND: RecordKind = RecordKind::Link;

    fn uid(&self) -> &str {
        &self.uid
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub uid: String,
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
    pub mime: String,
    pub width: i64,
    pub height: i64,
}

impl Record for Thumbnail {
    const KIND: RecordKind = RecordKind::Thumbnail;

    fn uid(&self) -> &str {
        &self.uid
    }
}

/// Rejects uids that would escape the kind's staging directory when used as a file name.
pub fn validate_uid(uid: &str) -> Result<(), DomainError> {
    if uid.contains(['/', '\\', '\0']) {
        return Err(DomainError::UnsafeUid(uid.to_string()));
    }
    Ok(())
}

mod base64_bytes {
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        serializer.serialize_str(&encoded)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        base64::engine::general_purpose::STANDARD
            .decode(&s)
            .map_err(serde::de::Error::custom)
    }
}
