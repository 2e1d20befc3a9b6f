use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("uid {0:?} cannot be used as a staging file name")]
    UnsafeUid(String),
}
