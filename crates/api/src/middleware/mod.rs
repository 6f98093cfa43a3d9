//! Middleware for the API routes.

pub mod request_scope;

pub use request_scope::{RequestScope, request_scope};
