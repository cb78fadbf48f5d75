//! Core business logic for nexus.

pub mod services;

pub use services::*;
