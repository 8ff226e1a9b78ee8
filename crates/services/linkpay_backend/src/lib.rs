pub mod app_state;
pub mod handlers;
pub mod pages;
pub mod routes;
pub mod token_store;

pub use app_state::AppState;
pub use routes::routes;
