//! Document and blob store adapters
//!
//! `InMemoryDocumentStore` backs the three repository ports and pushes a
//! `StoreChange` to subscribers after every write. `LocalBlobStore` keeps
//! media attachments on disk.

mod blob;
mod memory;

pub use blob::LocalBlobStore;
pub use memory::{Collection, InMemoryDocumentStore, StoreChange, StoreSnapshot};
