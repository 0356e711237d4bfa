// ABOUTME: HTTP server for recipebox exposing the recipe store as a JSON API.
// ABOUTME: Uses Axum with a shared, mutex-guarded store and preferences.

pub mod api;
pub mod app_state;
pub mod config;
pub mod routes;

pub use app_state::{AppState, SharedState};
pub use config::RecipeboxConfig;
pub use routes::create_router;
