// queue/mod.rs - Queue subsystem
//
// A queue is a directory, a message is a file, a link is an additional
// directory entry sharing a message's identity across queues.

mod binder;
mod store;
mod writer;

pub use binder::{Link, LinkBinder};
pub use store::{Queue, QueueStore};
pub use writer::{Message, MessageWriter};
