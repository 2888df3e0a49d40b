//! Session-bound client for the Borla Tracker administration backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every consumer (the `borla` CLI, embedders) talks to the backend through a
//! single [`ApiClient`]. The client owns the persisted [`Session`], injects the
//! bearer token, and normalizes responses into one [`ApiError`] taxonomy.
//! `api` holds the typed endpoint wrappers; `routes` maps outcomes onto the
//! console's navigation targets.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod routes;
pub mod session;

#[cfg(test)]
mod test_support;

pub use client::{ApiClient, ApiResponse, RequestOptions};
pub use config::ClientConfig;
pub use error::ApiError;
pub use routes::Route;
pub use session::{FileStore, MemoryStore, Session, SessionStore};
