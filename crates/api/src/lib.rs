//! HTTP API layer for nexus.
//!
//! Procedures are exposed as POST endpoints grouped by domain, with JSON
//! bodies in and a uniform response envelope out. Authentication rides on
//! a session token resolved by middleware from the Authorization header
//! or the session cookie.
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::AppState;
