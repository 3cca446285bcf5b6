//! FileSystemDriver for EVQ
//!
//! Drives a real mounted filesystem with discrete, blocking `std::fs`
//! operations. Identity-sharing is realized with hard links; a mount that
//! cannot hard-link between the two locations surfaces
//! `CrossQueueUnsupported` instead of falling back to a copy.

use crate::drivers::StorageDriver;
use crate::errors::{EvqError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Storage driver backed by a mounted filesystem
#[derive(Debug, Clone)]
pub struct FileSystemDriver {
    root: PathBuf,
}

impl FileSystemDriver {
    /// Create a new FileSystemDriver rooted at the mount path
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Mount path this driver operates under
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn classify_link_error(err: std::io::Error, source: &Path, dest: &Path) -> EvqError {
        #[cfg(unix)]
        {
            // link(2): EXDEV when source and destination live on different
            // stores, EPERM when the filesystem refuses hard links outright.
            // EACCES is the ordinary permission case and falls through.
            if let Some(code) = err.raw_os_error() {
                if code == libc::EXDEV || code == libc::EPERM {
                    return EvqError::CrossQueueUnsupported(format!(
                        "{} -> {}",
                        source.display(),
                        dest.display()
                    ));
                }
            }
        }

        match err.kind() {
            ErrorKind::AlreadyExists => EvqError::DestinationExists(dest.display().to_string()),
            ErrorKind::NotFound => EvqError::SourceMissing(source.display().to_string()),
            ErrorKind::PermissionDenied => EvqError::PermissionDenied(dest.display().to_string()),
            ErrorKind::Unsupported => EvqError::CrossQueueUnsupported(format!(
                "{} -> {}",
                source.display(),
                dest.display()
            )),
            _ => EvqError::Io(err),
        }
    }
}

impl StorageDriver for FileSystemDriver {
    fn create_directory(&self, path: &Path) -> Result<()> {
        match fs::create_dir(path) {
            Ok(()) => Ok(()),
            Err(e) => Err(match e.kind() {
                ErrorKind::AlreadyExists => {
                    EvqError::AlreadyExists(path.display().to_string())
                }
                ErrorKind::NotFound => {
                    let parent = path.parent().unwrap_or(&self.root);
                    EvqError::NotMounted(parent.display().to_string())
                }
                ErrorKind::PermissionDenied => {
                    EvqError::PermissionDenied(path.display().to_string())
                }
                _ => EvqError::Io(e),
            }),
        }
    }

    fn create_file(&self, path: &Path, content: &[u8]) -> Result<()> {
        // Create-or-truncate, exactly the supplied bytes
        match fs::write(path, content) {
            Ok(()) => Ok(()),
            Err(e) => Err(match e.kind() {
                ErrorKind::NotFound => {
                    let parent = path.parent().unwrap_or(&self.root);
                    EvqError::QueueMissing(parent.display().to_string())
                }
                _ => EvqError::WriteFailure(format!("{}: {}", path.display(), e)),
            }),
        }
    }

    fn create_link(&self, source: &Path, dest: &Path) -> Result<()> {
        if !source.exists() {
            return Err(EvqError::SourceMissing(source.display().to_string()));
        }
        if dest.exists() {
            return Err(EvqError::DestinationExists(dest.display().to_string()));
        }
        if let Some(parent) = dest.parent() {
            if !parent.exists() {
                return Err(EvqError::QueueMissing(parent.display().to_string()));
            }
        }

        fs::hard_link(source, dest)
            .map_err(|e| Self::classify_link_error(e, source, dest))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_directory(&self, path: &Path) -> Result<Vec<String>> {
        let entries = fs::read_dir(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => EvqError::NotMounted(path.display().to_string()),
            ErrorKind::PermissionDenied => EvqError::PermissionDenied(path.display().to_string()),
            _ => EvqError::Io(e),
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }
}
