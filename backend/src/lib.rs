//! REST record store backing the student task tracker.
//!
//! Every collection (`users`, `tasks`, `features`, `team`) is served
//! under its own path with the same five routes:
//!
//! | Method   | Path                       | Result                         |
//! |----------|----------------------------|--------------------------------|
//! | `GET`    | `/{collection}?field=value`| records matching every filter  |
//! | `GET`    | `/{collection}/{id}`       | one record or `404`            |
//! | `POST`   | `/{collection}`            | `201` with the stored record   |
//! | `PUT`    | `/{collection}/{id}`       | full replacement or `404`      |
//! | `DELETE` | `/{collection}/{id}`       | `{}` or `404`                  |
//!
//! Anything else falls through to the compiled frontend when a static
//! directory is configured.

use std::path::PathBuf;

use axum::Router;
use tokio::{
    net::TcpListener,
    signal::{self, ctrl_c},
};
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::{error, info, warn};
use tracker_shared::Collection;

pub mod config;
pub mod error;
pub mod routes;
pub mod seed;
pub mod store;

use config::{Config, StoreBackend};
use error::StoreError;
use seed::SeedFile;
use store::Storage;

pub fn app(storage: Storage, static_dir: Option<PathBuf>) -> Router {
    let mut router = Collection::ALL
        .into_iter()
        .fold(Router::new(), |router, collection| {
            router.nest(
                &format!("/{collection}"),
                routes::collection_router(collection),
            )
        });

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router.layer(CorsLayer::permissive()).with_state(storage)
}

pub async fn start_server(config: Config) -> Result<(), StoreError> {
    info!("Initializing {:?} store...", config.store_backend);
    let storage = match config.store_backend {
        StoreBackend::Redis => {
            info!("Redis URL: {}", config.redis_url);
            Storage::redis(&config.redis_url)?
        }
        StoreBackend::Memory => Storage::memory(),
    };

    if let Some(file) = SeedFile::load(&config.seed_path)? {
        seed::seed(&storage, file).await?;
    }

    let static_dir = config.static_dir.is_dir().then(|| config.static_dir.clone());
    if static_dir.is_none() {
        warn!(
            "Static directory {} missing, serving the API only",
            config.static_dir.display()
        );
    }

    let address = format!("0.0.0.0:{}", config.port);
    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on http://localhost:{} ({} store)", config.port, storage.kind());

    axum::serve(listener, app(storage, static_dir))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install terminate handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
