//! Configuración de variables de entorno
//!
//! Este módulo lee la configuración del servidor y del store desde el entorno.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be set when STORE_BACKEND={backend}")]
    Missing { name: &'static str, backend: &'static str },

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Backend del collection store
#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackend {
    /// En memoria, opcionalmente sembrado y persistido en un fichero db.json
    Memory { path: Option<PathBuf> },
    /// Registros JSONB en PostgreSQL
    Postgres { url: String },
    /// Servidor de registros remoto compatible con json-server
    Http { base_url: String },
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    pub store: StoreBackend,
    pub upstream_timeout: Duration,
    pub bcrypt_cost: u32,
}

const DEV_JWT_SECRET: &str = "dev-only-secret-change-me";

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 4000,
            host: "0.0.0.0".to_string(),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            jwt_expiration: 3600,
            cors_origins: Vec::new(),
            store: StoreBackend::Memory { path: None },
            upstream_timeout: Duration::from_secs(10),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl EnvironmentConfig {
    /// Cargar la configuración desde variables de entorno
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let store = match var("STORE_BACKEND").as_deref().unwrap_or("memory") {
            "memory" => StoreBackend::Memory {
                path: var("DB_JSON_PATH").map(PathBuf::from),
            },
            "postgres" => StoreBackend::Postgres {
                url: var("DATABASE_URL").ok_or(ConfigError::Missing {
                    name: "DATABASE_URL",
                    backend: "postgres",
                })?,
            },
            "http" => StoreBackend::Http {
                base_url: var("COLLECTION_STORE_URL").ok_or(ConfigError::Missing {
                    name: "COLLECTION_STORE_URL",
                    backend: "http",
                })?,
            },
            other => {
                return Err(ConfigError::Invalid {
                    name: "STORE_BACKEND",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            environment: var("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parsed("PORT")?.unwrap_or(defaults.port),
            host: var("HOST").unwrap_or(defaults.host),
            jwt_secret: var("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            jwt_expiration: parsed("JWT_EXPIRATION")?.unwrap_or(defaults.jwt_expiration),
            cors_origins: var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            store,
            upstream_timeout: parsed("UPSTREAM_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.upstream_timeout),
            bcrypt_cost: parsed("BCRYPT_COST")?.unwrap_or(defaults.bcrypt_cost),
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// El secreto JWT de desarrollo sigue activo
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Variable no vacía
fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parsed<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    var(name)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { name, value })
        })
        .transpose()
}
