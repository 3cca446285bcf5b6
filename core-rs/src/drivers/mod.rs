//! Drivers module for storage operations
//!
//! Provides the abstract backing-store interface (StorageDriver trait) and
//! implementations:
//! - FileSystemDriver: real mounted filesystem
//! - MemoryDriver: in-memory fake for tests

mod filesystem;
mod memory;
mod traits;

pub use filesystem::FileSystemDriver;
pub use memory::MemoryDriver;
pub use traits::StorageDriver;
