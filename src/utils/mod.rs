//! Utilidades del sistema
//!
//! Manejo de errores, validación de entrada y JWT.

pub mod errors;
pub mod jwt;
pub mod validation;
