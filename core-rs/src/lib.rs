//! # EVQ Core - Event-Queue Directory Model
//!
//! EVQ models a filesystem-mapped event queue: a directory is a queue, a
//! file inside it is an enqueued event message, and a hard link is the same
//! event delivered through multiple queues at once. This crate provides the
//! model, a harness that reproduces the canonical driver scenarios against a
//! mounted backing store, and an in-memory fake of that store for tests.
//!
//! ## Core Principle
//!
//! **Fan-out is shared identity, not a copy**: every name bound to a message
//! refers to one underlying identity, so a mutation through any name is
//! observable through all of them. A backing store that cannot honor this
//! must say so; the harness never degrades a link to a copy.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │      mount path (backing store)     │
//! │  test-0/ .. test-N/  queues         │
//! │  test-0/input        message        │
//! │  test-k/link         shared identity│
//! └─────────────────────────────────────┘
//!           ▲
//!           │ StorageDriver (filesystem | memory)
//!     ┌─────┴────────────────────────┐
//!     │ QueueStore → MessageWriter   │
//!     │            → LinkBinder      │
//!     │ HarnessDriver (evq CLI)      │
//!     └──────────────────────────────┘
//! ```
//!
//! Data flows one direction; nothing reads results back. Verification is
//! performed externally against the mount while the harness holds the
//! process open.

pub mod drivers;
pub mod errors;
pub mod harness;
pub mod queue;

pub use drivers::{FileSystemDriver, MemoryDriver, StorageDriver};
pub use errors::{EvqError, Result};
pub use harness::{DriverState, HarnessConfig, HarnessDriver, Scenario};
pub use queue::{Link, LinkBinder, Message, MessageWriter, Queue, QueueStore};

/// Version of the EVQ harness protocol
pub const VERSION: &str = "0.2.1";

/// Number of queues the canonical scenarios create
pub const DEFAULT_QUEUE_COUNT: usize = 10;

/// Number of messages per queue in the populate scenario
pub const DEFAULT_MESSAGE_COUNT: usize = 10;

/// Queue directories are named `test-0 .. test-(N-1)`
pub const QUEUE_NAME_PREFIX: &str = "test-";

/// Name of the message the fan-out scenario writes into the first queue
pub const FANOUT_MESSAGE_NAME: &str = "input";

/// Name of the link entry bound into each remaining queue
pub const FANOUT_LINK_NAME: &str = "link";

/// Content of the fan-out message, no trailing newline
pub const FANOUT_MESSAGE_TEXT: &str = "event text";
