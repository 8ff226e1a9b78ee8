use linkpay_backend::{routes, AppState};
use linkpay_common::logging;
use linkpay_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::info;

#[tokio::main]
async fn main() {
    let config = Arc::new(load_config().expect("Failed to load config"));
    logging::init();

    let state = Arc::new(AppState::new(config.clone()));

    let app = routes(state).nest_service("/static", ServeDir::new("public"));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await.expect("Failed to bind");
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}
