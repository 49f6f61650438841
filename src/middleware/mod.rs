//! Middleware del sistema
//!
//! CORS y autenticación por bearer token.

pub mod auth;
pub mod cors;

pub use auth::*;
pub use cors::*;
