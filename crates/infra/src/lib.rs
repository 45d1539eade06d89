//! # Postdeck Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - Configuration loading (environment variables, JSON/TOML files)
//! - HTTP client with retry and backoff
//! - The caption generation service client
//! - Document store and blob store adapters
//! - The live calendar feed that re-projects on every store change
//!
//! ## Architecture
//! - Implements traits defined in `postdeck-core`
//! - Contains all "impure" code (network, filesystem, background tasks)

pub mod config;
pub mod errors;
pub mod feed;
pub mod http;
pub mod integrations;
pub mod store;

// Re-export commonly used items
pub use errors::InfraError;
pub use feed::{CalendarFeed, FeedError};
pub use http::{HttpClient, HttpClientBuilder};
pub use integrations::generation::{GenerationClient, GenerationError};
pub use store::{InMemoryDocumentStore, LocalBlobStore, StoreChange, StoreSnapshot};
