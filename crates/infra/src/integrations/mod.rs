//! External service integrations

pub mod generation;
