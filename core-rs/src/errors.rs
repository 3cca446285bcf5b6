//! Error types for EVQ Core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvqError {
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Mount path does not exist: {0}")]
    NotMounted(String),

    #[error("Queue already exists: {0}")]
    AlreadyExists(String),

    #[error("Link destination already exists: {0}")]
    DestinationExists(String),

    #[error("Queue does not exist: {0}")]
    QueueMissing(String),

    #[error("Link source does not exist: {0}")]
    SourceMissing(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Write failure: {0}")]
    WriteFailure(String),

    #[error("Backing store does not support identity-sharing links: {0}")]
    CrossQueueUnsupported(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EvqError>;
