//! Storage driver trait for EVQ
//!
//! Defines the abstract interface for the backing store the harness drives.
//! Implementations include:
//! - FileSystemDriver (real mount)
//! - MemoryDriver (in-memory fake for tests)

use crate::errors::Result;
use std::path::Path;

/// Storage driver trait
///
/// The injected storage capability behind the queue components. The harness
/// never implements the backing store itself; it only issues discrete,
/// blocking operations against one and surfaces whatever the store reports.
///
/// # Protocol Semantics
///
/// Drivers must:
/// - Fail creation when the target entry already exists (never overwrite a
///   directory, never replace a link destination)
/// - Bind links by shared identity, never by copy; a store that cannot share
///   identity across the two directories must report
///   `CrossQueueUnsupported` rather than degrade
/// - Classify failures into the `EvqError` taxonomy
pub trait StorageDriver: Send + Sync {
    /// Create a directory at `path`
    ///
    /// Fails with `AlreadyExists` on collision, `NotMounted` when the parent
    /// chain is absent, `PermissionDenied` when the parent is not writable.
    fn create_directory(&self, path: &Path) -> Result<()>;

    /// Create a file at `path` holding exactly `content`
    ///
    /// Create-or-truncate semantics. Fails with `QueueMissing` when the
    /// containing directory is absent, `WriteFailure` for other I/O faults.
    fn create_file(&self, path: &Path, content: &[u8]) -> Result<()>;

    /// Create a new directory entry `dest` sharing identity with `source`
    ///
    /// Fails with `SourceMissing` when `source` is absent,
    /// `DestinationExists` when `dest` is occupied, `QueueMissing` when the
    /// destination directory is absent, and `CrossQueueUnsupported` when the
    /// store cannot share identity between the two locations.
    fn create_link(&self, source: &Path, dest: &Path) -> Result<()>;

    /// Whether an entry exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// List the entry names directly under `path`, name-sorted
    fn list_directory(&self, path: &Path) -> Result<Vec<String>>;
}
