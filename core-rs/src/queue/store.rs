//! QueueStore - the set of named event queues under a root
//!
//! A queue is a directory. Creation is collision-checked (a queue must not
//! pre-exist), batch creation is strictly sequential with no rollback, and
//! the creation order is part of the externally observed contract.

use crate::drivers::StorageDriver;
use crate::errors::{EvqError, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// A named event queue realized as a directory under the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Queue {
    /// Queue name, unique within the root
    pub name: String,
    /// Full path of the queue directory
    pub path: PathBuf,
}

/// Manages the set of named queues under a root mount path
pub struct QueueStore {
    driver: Arc<dyn StorageDriver>,
    root: PathBuf,
}

impl QueueStore {
    /// Create a new QueueStore over the given backing store and root
    pub fn new(driver: Arc<dyn StorageDriver>, root: PathBuf) -> Self {
        Self { driver, root }
    }

    /// Root path queues are created under
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create one queue directory
    ///
    /// Fails with `AlreadyExists` if the directory is already present and
    /// `NotMounted` if the root itself is absent.
    pub fn create_queue(&self, name: &str) -> Result<Queue> {
        if !self.driver.exists(&self.root) {
            return Err(EvqError::NotMounted(self.root.display().to_string()));
        }

        let path = self.root.join(name);
        self.driver.create_directory(&path)?;
        debug!(queue = name, "created queue directory");

        Ok(Queue {
            name: name.to_string(),
            path,
        })
    }

    /// Create queues in the exact order supplied
    ///
    /// Stops at the first failure; earlier queues are left in place for
    /// external inspection.
    pub fn create_queues<I, S>(&self, names: I) -> Result<Vec<Queue>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut queues = Vec::new();
        for name in names {
            queues.push(self.create_queue(name.as_ref())?);
        }
        Ok(queues)
    }

    /// Whether a queue directory with this name exists under the root
    pub fn queue_exists(&self, name: &str) -> bool {
        self.driver.exists(&self.root.join(name))
    }

    /// Name-sorted snapshot of the entries under the root
    pub fn list_queues(&self) -> Result<Vec<String>> {
        self.driver.list_directory(&self.root)
    }
}
