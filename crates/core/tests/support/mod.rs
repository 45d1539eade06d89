//! Shared test helpers for `postdeck-core` integration tests.
//!
//! Lightweight in-memory mocks for every port plus fixtures, so service
//! tests can focus on behaviour instead of boilerplate.

pub mod fixtures;
pub mod generator;
pub mod store;
