//! # Postdeck App
//!
//! Application layer - commands and the `postdeck` binary.
//!
//! This crate contains:
//! - Commands (UI → backend bridge) that map failures to notifications
//! - Application context (dependency injection)
//! - Logging initialisation
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::*;
