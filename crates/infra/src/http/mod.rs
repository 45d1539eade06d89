//! HTTP plumbing shared by every remote integration.

mod client;

pub use client::{HttpClient, HttpClientBuilder};
