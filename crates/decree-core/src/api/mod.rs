//! REST access to the repository and policy configuration endpoints.

pub mod client;
pub mod endpoints;

pub use client::DevOpsClient;
pub use endpoints::{DEFAULT_API_VERSION, Endpoints};
