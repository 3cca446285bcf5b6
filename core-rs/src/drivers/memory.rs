//! MemoryDriver for EVQ
//!
//! In-memory fake of the backing store, used to exercise the queue
//! components and the harness without a real mount. Message content lives
//! behind shared handles, so a link and its original alias one buffer and a
//! write through either name is readable through the other — the same
//! identity contract a hard link provides on a real filesystem.

use crate::drivers::StorageDriver;
use crate::errors::{EvqError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

#[derive(Clone)]
enum Entry {
    Directory,
    File(Arc<RwLock<Vec<u8>>>),
}

/// Storage driver backed by an in-memory entry map
pub struct MemoryDriver {
    root: PathBuf,
    entries: Mutex<HashMap<PathBuf, Entry>>,
}

impl MemoryDriver {
    /// Create a new MemoryDriver with the root directory already present
    pub fn new(root: PathBuf) -> Self {
        let mut entries = HashMap::new();
        entries.insert(root.clone(), Entry::Directory);
        Self {
            root,
            entries: Mutex::new(entries),
        }
    }

    /// Root path this driver was created with
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read a file's current content through any of its names
    pub fn read(&self, path: &Path) -> Option<Vec<u8>> {
        let entries = self.entries.lock().expect("entries lock poisoned");
        match entries.get(path) {
            Some(Entry::File(content)) => {
                Some(content.read().expect("content lock poisoned").clone())
            }
            _ => None,
        }
    }

    /// Replace a file's content through one of its names
    ///
    /// Models the write extension of the identity contract: the new content
    /// must be observable through every other name bound to the same file.
    pub fn write_through(&self, path: &Path, content: &[u8]) -> Result<()> {
        let entries = self.entries.lock().expect("entries lock poisoned");
        match entries.get(path) {
            Some(Entry::File(existing)) => {
                let mut buffer = existing.write().expect("content lock poisoned");
                buffer.clear();
                buffer.extend_from_slice(content);
                Ok(())
            }
            _ => Err(EvqError::SourceMissing(path.display().to_string())),
        }
    }

    /// Whether two names are bound to the same underlying file
    pub fn shares_identity(&self, a: &Path, b: &Path) -> bool {
        let entries = self.entries.lock().expect("entries lock poisoned");
        match (entries.get(a), entries.get(b)) {
            (Some(Entry::File(left)), Some(Entry::File(right))) => Arc::ptr_eq(left, right),
            _ => false,
        }
    }

    /// Number of entries created beneath the root
    pub fn entry_count(&self) -> usize {
        let entries = self.entries.lock().expect("entries lock poisoned");
        entries.len() - 1
    }

    fn parent_is_directory(
        entries: &HashMap<PathBuf, Entry>,
        path: &Path,
    ) -> std::result::Result<(), PathBuf> {
        match path.parent() {
            Some(parent) if matches!(entries.get(parent), Some(Entry::Directory)) => Ok(()),
            Some(parent) => Err(parent.to_path_buf()),
            None => Err(PathBuf::new()),
        }
    }
}

impl StorageDriver for MemoryDriver {
    fn create_directory(&self, path: &Path) -> Result<()> {
        let mut entries = self.entries.lock().expect("entries lock poisoned");
        if entries.contains_key(path) {
            return Err(EvqError::AlreadyExists(path.display().to_string()));
        }
        if let Err(parent) = Self::parent_is_directory(&entries, path) {
            return Err(EvqError::NotMounted(parent.display().to_string()));
        }
        entries.insert(path.to_path_buf(), Entry::Directory);
        Ok(())
    }

    fn create_file(&self, path: &Path, content: &[u8]) -> Result<()> {
        let mut entries = self.entries.lock().expect("entries lock poisoned");
        match entries.get(path) {
            Some(Entry::Directory) => {
                return Err(EvqError::WriteFailure(format!(
                    "{}: is a directory",
                    path.display()
                )));
            }
            Some(Entry::File(existing)) => {
                // Create-or-truncate keeps the identity: every name bound to
                // this file observes the new content
                let mut buffer = existing.write().expect("content lock poisoned");
                buffer.clear();
                buffer.extend_from_slice(content);
                return Ok(());
            }
            None => {}
        }
        if let Err(parent) = Self::parent_is_directory(&entries, path) {
            return Err(EvqError::QueueMissing(parent.display().to_string()));
        }
        entries.insert(
            path.to_path_buf(),
            Entry::File(Arc::new(RwLock::new(content.to_vec()))),
        );
        Ok(())
    }

    fn create_link(&self, source: &Path, dest: &Path) -> Result<()> {
        let mut entries = self.entries.lock().expect("entries lock poisoned");
        let content = match entries.get(source) {
            Some(Entry::File(content)) => Arc::clone(content),
            Some(Entry::Directory) => {
                // Directories cannot share identity, matching link(2)
                return Err(EvqError::CrossQueueUnsupported(format!(
                    "{} -> {}",
                    source.display(),
                    dest.display()
                )));
            }
            None => {
                return Err(EvqError::SourceMissing(source.display().to_string()));
            }
        };
        if entries.contains_key(dest) {
            return Err(EvqError::DestinationExists(dest.display().to_string()));
        }
        if let Err(parent) = Self::parent_is_directory(&entries, dest) {
            return Err(EvqError::QueueMissing(parent.display().to_string()));
        }
        entries.insert(dest.to_path_buf(), Entry::File(content));
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let entries = self.entries.lock().expect("entries lock poisoned");
        entries.contains_key(path)
    }

    fn list_directory(&self, path: &Path) -> Result<Vec<String>> {
        let entries = self.entries.lock().expect("entries lock poisoned");
        if !matches!(entries.get(path), Some(Entry::Directory)) {
            return Err(EvqError::NotMounted(path.display().to_string()));
        }
        let mut names: Vec<String> = entries
            .keys()
            .filter(|p| p.parent() == Some(path))
            .filter_map(|p| p.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect();
        names.sort();
        Ok(names)
    }
}
