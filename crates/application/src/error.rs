use loadlink_domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("connection error: {0}")]
    Connection(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("data error: {0}")]
    Data(String),
    #[error("transaction error: {0}")]
    Transaction(String),
}
