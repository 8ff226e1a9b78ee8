use crate::app_state::AppState;
use crate::handlers::{
    billing_handler, get_access_token_handler, index_handler, set_access_token_handler,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Creates the application router.
pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/billing", get(billing_handler))
        .route("/get_access_token", post(get_access_token_handler))
        .route("/set_access_token", post(set_access_token_handler))
        .with_state(state)
}
