//! Infrastructure error plumbing.

pub(crate) mod conversions;

pub use conversions::InfraError;
