//! MessageWriter - enqueues event messages as files
//!
//! A message is a file inside a queue directory. Content is opaque bytes;
//! any formatting (decimal indices, trailing newlines) is the caller's
//! concern. Exactly one file is created per call.

use crate::drivers::StorageDriver;
use crate::errors::{EvqError, Result};
use crate::queue::Queue;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// A single enqueued event message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Queue the message was written into
    pub queue: String,
    /// File name inside the queue directory
    pub name: String,
    /// Full path of the message file
    pub path: PathBuf,
    /// Content length in bytes
    pub len: u64,
}

/// Writes event messages into queue directories
pub struct MessageWriter {
    driver: Arc<dyn StorageDriver>,
}

impl MessageWriter {
    /// Create a new MessageWriter over the given backing store
    pub fn new(driver: Arc<dyn StorageDriver>) -> Self {
        Self { driver }
    }

    /// Write a message file holding exactly `content`
    ///
    /// Fails with `QueueMissing` if the queue directory is gone and
    /// `WriteFailure` for underlying I/O faults. Content is immutable once
    /// written as far as this component is concerned.
    pub fn write_message(&self, queue: &Queue, name: &str, content: &[u8]) -> Result<Message> {
        if !self.driver.exists(&queue.path) {
            return Err(EvqError::QueueMissing(queue.path.display().to_string()));
        }

        let path = queue.path.join(name);
        self.driver.create_file(&path, content)?;
        debug!(queue = queue.name.as_str(), entry = name, "wrote event message");

        Ok(Message {
            queue: queue.name.clone(),
            name: name.to_string(),
            path,
            len: content.len() as u64,
        })
    }
}
