//! LinkBinder - fans one event out across queues by shared identity
//!
//! Binding adds a second (or further) directory entry for an existing
//! message, so the same logical event is observable from multiple queues
//! without duplicating content. This must remain distinguishable from a
//! copy: a write through one name is visible through every other, and a
//! store that cannot share identity surfaces `CrossQueueUnsupported`
//! instead of degrading.

use crate::drivers::StorageDriver;
use crate::errors::Result;
use crate::queue::{Message, Queue};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// An additional directory entry bound to an existing message's identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Path of the message the link was bound from
    pub source: PathBuf,
    /// Path of the new directory entry
    pub path: PathBuf,
}

/// Binds existing messages into additional queues
pub struct LinkBinder {
    driver: Arc<dyn StorageDriver>,
}

impl LinkBinder {
    /// Create a new LinkBinder over the given backing store
    pub fn new(driver: Arc<dyn StorageDriver>) -> Self {
        Self { driver }
    }

    /// Bind a new directory entry sharing identity with `existing`
    ///
    /// Fails with `SourceMissing` if `existing` does not reference a
    /// message, `DestinationExists` if `new_path` is occupied, and
    /// `CrossQueueUnsupported` if the backing store cannot share identity
    /// between the two locations.
    pub fn bind_link(&self, existing: &Path, new_path: &Path) -> Result<Link> {
        self.driver.create_link(existing, new_path)?;
        debug!(
            source = %existing.display(),
            link = %new_path.display(),
            "bound link"
        );

        Ok(Link {
            source: existing.to_path_buf(),
            path: new_path.to_path_buf(),
        })
    }

    /// Bind a message into another queue under the given entry name
    pub fn bind_into_queue(&self, message: &Message, queue: &Queue, name: &str) -> Result<Link> {
        self.bind_link(&message.path, &queue.path.join(name))
    }
}
