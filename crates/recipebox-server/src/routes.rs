// ABOUTME: Route definitions for the recipebox HTTP API.
// ABOUTME: Assembles all API routes into a single Axum Router with shared state and request tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::SharedState;

/// Build the complete Axum router with all routes and shared state.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/recipes",
            get(api::recipes::list_recipes).post(api::recipes::create_recipe),
        )
        .route("/api/recipes/import", post(api::import::import_recipes))
        .route("/api/recipes/export", get(api::recipes::export_recipes))
        .route(
            "/api/recipes/at/{position}",
            get(api::recipes::get_recipe_at)
                .put(api::recipes::update_recipe_at)
                .delete(api::recipes::delete_recipe_at),
        )
        .route(
            "/api/recipes/{id}",
            get(api::recipes::get_recipe)
                .put(api::recipes::update_recipe)
                .delete(api::recipes::delete_recipe),
        )
        .route("/api/recipes/{id}/edit-link", get(api::recipes::edit_link))
        .route("/api/edit-form", get(api::recipes::edit_form))
        .route("/api/categories", get(api::recipes::list_categories))
        .route(
            "/api/preferences/theme",
            get(api::preferences::get_theme).put(api::preferences::set_theme),
        )
        .route(
            "/api/preferences/theme/toggle",
            post(api::preferences::toggle_theme),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler. Returns 200 OK with a simple JSON body.
async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::AppState;
    use axum::body::Body;
    use http::Request;
    use std::sync::Arc;
    use tower::ServiceExt;

    #[tokio::test]
    async fn health_returns_ok() {
        let app = create_router(Arc::new(AppState::in_memory().unwrap()));
        let resp = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn categories_are_listed() {
        let app = create_router(Arc::new(AppState::in_memory().unwrap()));
        let resp = app
            .oneshot(Request::get("/api/categories").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Vec<String> = serde_json::from_slice(&body).unwrap();
        assert!(json.contains(&"Dessert".to_string()));
    }
}
