//! Configuración del proyecto
//!
//! Variables de entorno, selección del backend del store y pool de PostgreSQL.

pub mod database;
pub mod environment;

pub use environment::*;
