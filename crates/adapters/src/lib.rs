pub mod error;
pub mod memory;
pub mod sled_store;
pub mod traits;

#[cfg(feature = "email")]
pub mod smtp;

pub use error::{AdapterError, Result};
pub use traits::{DirectoryLookup, KeyedStore, Notifier, Queue, QueueMessage, ResourceDescriber};
