//! Job Board Server
//!
//! Serves job listings from an in-memory store and exposes the listing
//! query engine as a REST API using Axum.

pub mod api;
pub mod config;
pub mod store;

pub use api::{AppState, router};
pub use config::ServerConfig;
pub use store::JobStore;
