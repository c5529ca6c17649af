use axum::{
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use crate::storage::VerseStore;

pub mod routes;

/// Server state
pub struct AppState {
    pub store: Mutex<VerseStore>,
}

impl AppState {
    pub fn new(store: VerseStore) -> Arc<Self> {
        Arc::new(Self {
            store: Mutex::new(store),
        })
    }
}

/// Routes of the query service
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/verse", get(routes::get_verse))
        .route("/api/books", get(routes::get_books))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(port: u16, store: VerseStore) -> anyhow::Result<()> {
    let app = router(AppState::new(store));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);
    println!("🌍 API server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
