//! REST API access: client, resource bindings and authentication.

pub mod auth;
pub mod client;
pub mod resource;

pub use client::{ApiClient, error_from_status};
pub use resource::{Records, Resource, ResourceKind};
