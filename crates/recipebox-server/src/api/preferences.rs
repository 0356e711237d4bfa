// ABOUTME: Theme preference handlers for reading, setting and toggling dark mode.
// ABOUTME: The flag lives in storage independently of the recipe collection.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::app_state::SharedState;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeBody {
    pub dark_mode: bool,
}

/// GET /api/preferences/theme
pub async fn get_theme(State(state): State<SharedState>) -> Result<Json<ThemeBody>, ApiError> {
    let prefs = state.preferences.lock().await;
    Ok(Json(ThemeBody {
        dark_mode: prefs.dark_mode()?,
    }))
}

/// PUT /api/preferences/theme
pub async fn set_theme(
    State(state): State<SharedState>,
    payload: Result<Json<ThemeBody>, JsonRejection>,
) -> Result<Json<ThemeBody>, ApiError> {
    let Json(body) = payload?;
    let mut prefs = state.preferences.lock().await;
    prefs.set_dark_mode(body.dark_mode)?;
    Ok(Json(body))
}

/// POST /api/preferences/theme/toggle
pub async fn toggle_theme(State(state): State<SharedState>) -> Result<Json<ThemeBody>, ApiError> {
    let mut prefs = state.preferences.lock().await;
    Ok(Json(ThemeBody {
        dark_mode: prefs.toggle_dark_mode()?,
    }))
}
