use axum::{
    Router,
    routing::{get, patch, post},
};

use std::sync::Arc;

use crate::{entries, services};
use engine::{ActionHandler, Connector, Registry};

pub struct ServerState<K: Connector> {
    pub registry: Arc<Registry<K>>,
    pub actions: ActionHandler<K>,
}

impl<K: Connector> ServerState<K> {
    pub fn new(registry: Arc<Registry<K>>) -> Self {
        Self {
            actions: ActionHandler::new(Arc::clone(&registry)),
            registry,
        }
    }
}

impl<K: Connector> Clone for ServerState<K> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            actions: self.actions.clone(),
        }
    }
}

pub fn router<K: Connector>(state: ServerState<K>) -> Router {
    Router::new()
        .route("/entries", get(entries::list::<K>).post(entries::create::<K>))
        .route(
            "/entries/{entry_id}",
            axum::routing::delete(entries::remove::<K>),
        )
        .route(
            "/entries/{entry_id}/options",
            patch(entries::update_options::<K>),
        )
        .route(
            "/services/spliit/create_expense",
            post(services::create_expense::<K>),
        )
        .with_state(state)
}

pub async fn run_with_listener<K: Connector>(
    registry: Arc<Registry<K>>,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(ServerState::new(registry))).await
}

pub fn spawn_with_listener<K: Connector>(
    registry: Arc<Registry<K>>,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(registry, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
