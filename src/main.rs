use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use rental_availability::config::database::DatabaseConfig;
use rental_availability::config::{EnvironmentConfig, StoreBackend};
use rental_availability::create_app;
use rental_availability::repositories::{CollectionStore, HttpStore, MemoryStore, PostgresStore};
use rental_availability::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🚗 Rental Availability API");
    info!("==========================");

    let config = EnvironmentConfig::from_env().context("Configuración de entorno inválida")?;

    if config.uses_default_secret() && !config.is_development() {
        warn!(
            "⚠️ JWT_SECRET no definido: se usa el secreto de desarrollo en '{}'",
            config.environment
        );
    }

    let store = match open_store(&config).await {
        Ok(store) => store,
        Err(e) => {
            error!("❌ Error abriendo el collection store: {}", e);
            return Err(e);
        }
    };
    info!("✅ Collection store '{}' listo", store.backend_name());

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("Dirección inválida: {}", config.server_url()))?;

    let app = create_app(AppState::new(config, store));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Estado del servicio");
    info!("📅 Disponibilidad:");
    info!("   GET  /available-vehicles?date=YYYY-MM-DD&type=&location=");
    info!("   GET  /vehicles/availability?date=YYYY-MM-DD&type=&location=");
    info!("🚗 Vehículos:");
    info!("   GET/POST /vehicles, GET/PUT/DELETE /vehicles/:id");
    info!("   GET  /vehicles/:id/quote?startDate=&endDate=&seats=");
    info!("📝 Reservas:");
    info!("   GET/POST /bookings, GET/DELETE /bookings/:id");
    info!("🔐 Autenticación:");
    info!("   POST /register, /signup, /login, /signin");
    info!("   GET  /users/:id (Bearer token)");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

async fn open_store(config: &EnvironmentConfig) -> Result<Arc<dyn CollectionStore>> {
    let store: Arc<dyn CollectionStore> = match &config.store {
        StoreBackend::Memory { path: Some(path) } => Arc::new(MemoryStore::open(path).await?),
        StoreBackend::Memory { path: None } => {
            warn!("⚠️ DB_JSON_PATH no definido: los datos sólo viven en memoria");
            Arc::new(MemoryStore::new())
        }
        StoreBackend::Postgres { url } => {
            Arc::new(PostgresStore::connect(&DatabaseConfig::new(url.clone())).await?)
        }
        StoreBackend::Http { base_url } => {
            info!("🌍 Collection store remoto: {}", base_url);
            Arc::new(HttpStore::new(base_url, config.upstream_timeout)?)
        }
    };
    Ok(store)
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
