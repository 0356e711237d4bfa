// ABOUTME: HTTP endpoint for importing recipes from the contents of a JSON file.
// ABOUTME: POST /api/recipes/import takes the raw file text and merges valid entries into the collection.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use super::ApiError;
use crate::app_state::SharedState;

/// Response body after importing recipes.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub imported: usize,
    pub total: usize,
}

/// POST /api/recipes/import - the body is the file content, a JSON array of recipes.
pub async fn import_recipes(
    State(state): State<SharedState>,
    body: String,
) -> Result<Json<ImportResponse>, ApiError> {
    let mut store = state.store.lock().await;
    let imported = store.import_merge(&body)?;
    Ok(Json(ImportResponse {
        imported,
        total: store.len(),
    }))
}

#[cfg(test)]
mod tests {
    use crate::app_state::AppState;
    use crate::routes::create_router;
    use axum::body::Body;
    use http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn post_import(app: axum::Router, body: &str) -> (StatusCode, serde_json::Value) {
        let resp = app
            .oneshot(
                Request::post("/api/recipes/import")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn import_merges_valid_entries() {
        let state = Arc::new(AppState::in_memory().unwrap());
        let raw = r#"[{"title":"A","ingredients":["x"],"steps":["y"]},{"title":""}]"#;

        let (status, json) = post_import(create_router(Arc::clone(&state)), raw).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["imported"], 1);
        assert_eq!(json["total"], 1);
        assert_eq!(state.store.lock().await.list()[0].title, "A");
    }

    #[tokio::test]
    async fn import_rejects_non_array() {
        let state = Arc::new(AppState::in_memory().unwrap());

        let (status, json) = post_import(create_router(Arc::clone(&state)), "{}").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("array"));
        assert!(state.store.lock().await.is_empty());
    }

    #[tokio::test]
    async fn import_rejects_file_without_valid_recipes() {
        let state = Arc::new(AppState::in_memory().unwrap());

        let (status, json) =
            post_import(create_router(Arc::clone(&state)), r#"[{"title":"x"}]"#).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json["error"].as_str().unwrap().contains("no valid recipes"));
    }
}
