use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, ServerConfig};
use tower_http::cors::CorsLayer;
use tracing::info;

use service::directory::{InMemoryStudentStore, StudentStore};

use crate::errors::StartupError;
use crate::routes::{self, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Router over the given store, with tracing and CORS layers.
pub fn app(students: Arc<dyn StudentStore>) -> Router {
    routes::build_router(AppState::new(students), build_cors())
}

/// Router over a freshly seeded in-memory directory.
pub fn seeded_app() -> Router {
    let store: Arc<dyn StudentStore> = InMemoryStudentStore::seeded();
    app(store)
}

pub fn load_bind_addr(server: &ServerConfig) -> Result<SocketAddr, StartupError> {
    let raw = server.bind_addr();
    raw.parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address `{raw}`: {e}")))
}

/// Build the app and serve until the process is killed.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    run_with_shutdown(cfg, std::future::pending::<()>()).await
}

/// Build the app and serve until `shutdown` resolves, then drain in-flight requests.
pub async fn run_with_shutdown<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = seeded_app();

    let addr = load_bind_addr(&cfg.server)?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.to_string(), source })?;
    info!(%addr, "student directory listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!(event = "drained", "server stopped accepting connections");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_from_config() {
        let cfg = ServerConfig { host: "0.0.0.0".into(), port: 8080, worker_threads: None };
        assert_eq!(load_bind_addr(&cfg).unwrap().port(), 8080);

        let bad = ServerConfig { host: "not a host".into(), port: 8080, worker_threads: None };
        assert!(matches!(load_bind_addr(&bad), Err(StartupError::InvalidConfig(_))));
    }
}
