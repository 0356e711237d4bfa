// ABOUTME: Recipe CRUD handlers: list/filter, get, create, update and delete by id or position.
// ABOUTME: Deletes require an explicit confirm=true query parameter.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, RawQuery, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use recipebox_core::{EditForm, EditLink, KNOWN_CATEGORIES, Recipe, RecipeFilter, RecipeInput};
use serde::{Deserialize, Serialize};

use super::{ApiError, parse_recipe_id};
use crate::app_state::SharedState;

/// A recipe together with its current position in the collection.
#[derive(Debug, Serialize)]
pub struct RecipeView {
    pub position: usize,
    pub summary: String,
    #[serde(flatten)]
    pub recipe: Recipe,
}

impl RecipeView {
    fn new(position: usize, recipe: &Recipe) -> Self {
        Self {
            position,
            summary: recipe.summary(),
            recipe: recipe.clone(),
        }
    }
}

/// Query parameters for destructive requests.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    pub confirm: bool,
}

/// Response body for the edit link endpoint.
#[derive(Debug, Serialize)]
pub struct EditLinkResponse {
    pub query: String,
    pub link: EditLink,
}

fn require_confirmation(params: &DeleteParams) -> Result<(), ApiError> {
    if params.confirm {
        Ok(())
    } else {
        Err(ApiError::new(
            StatusCode::CONFLICT,
            "deleting a recipe is irreversible; repeat the request with confirm=true",
        ))
    }
}

/// GET /api/recipes?q=&category= - List recipes, optionally filtered.
pub async fn list_recipes(
    State(state): State<SharedState>,
    Query(filter): Query<RecipeFilter>,
) -> Json<Vec<RecipeView>> {
    let store = state.store.lock().await;
    let views = store
        .list()
        .iter()
        .enumerate()
        .filter(|(_, recipe)| filter.matches(recipe))
        .map(|(position, recipe)| RecipeView::new(position, recipe))
        .collect();
    Json(views)
}

/// POST /api/recipes - Create a recipe at the end of the collection.
pub async fn create_recipe(
    State(state): State<SharedState>,
    payload: Result<Json<RecipeInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = payload?;
    let mut store = state.store.lock().await;
    let recipe = store.create(input)?.clone();
    let view = RecipeView::new(store.len() - 1, &recipe);
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/recipes/{id}
pub async fn get_recipe(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<RecipeView>, ApiError> {
    let id = parse_recipe_id(&id)?;
    let store = state.store.lock().await;
    let position = store
        .position_of(id)
        .ok_or_else(|| ApiError::new(StatusCode::NOT_FOUND, "recipe not found"))?;
    Ok(Json(RecipeView::new(position, &store.list()[position])))
}

/// PUT /api/recipes/{id}
pub async fn update_recipe(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    payload: Result<Json<RecipeInput>, JsonRejection>,
) -> Result<Json<RecipeView>, ApiError> {
    let id = parse_recipe_id(&id)?;
    let Json(input) = payload?;
    let mut store = state.store.lock().await;
    let recipe = store.update(id, input)?.clone();
    let position = store.position_of(id).unwrap_or_default();
    Ok(Json(RecipeView::new(position, &recipe)))
}

/// DELETE /api/recipes/{id}?confirm=true
pub async fn delete_recipe(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<Recipe>, ApiError> {
    let id = parse_recipe_id(&id)?;
    require_confirmation(&params)?;
    let mut store = state.store.lock().await;
    Ok(Json(store.delete(id)?))
}

/// GET /api/recipes/at/{position}
pub async fn get_recipe_at(
    State(state): State<SharedState>,
    Path(position): Path<usize>,
) -> Result<Json<RecipeView>, ApiError> {
    let store = state.store.lock().await;
    let recipe = store.get_at(position).ok_or_else(|| {
        ApiError::new(
            StatusCode::NOT_FOUND,
            format!("no recipe at position {}", position),
        )
    })?;
    Ok(Json(RecipeView::new(position, recipe)))
}

/// PUT /api/recipes/at/{position}
pub async fn update_recipe_at(
    State(state): State<SharedState>,
    Path(position): Path<usize>,
    payload: Result<Json<RecipeInput>, JsonRejection>,
) -> Result<Json<RecipeView>, ApiError> {
    let Json(input) = payload?;
    let mut store = state.store.lock().await;
    let recipe = store.update_at(position, input)?;
    Ok(Json(RecipeView::new(position, recipe)))
}

/// DELETE /api/recipes/at/{position}?confirm=true
pub async fn delete_recipe_at(
    State(state): State<SharedState>,
    Path(position): Path<usize>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<Recipe>, ApiError> {
    require_confirmation(&params)?;
    let mut store = state.store.lock().await;
    Ok(Json(store.delete_at(position)?))
}

/// GET /api/recipes/{id}/edit-link - Query string that prefills the edit form.
pub async fn edit_link(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<EditLinkResponse>, ApiError> {
    let id = parse_recipe_id(&id)?;
    let store = state.store.lock().await;
    let position = store
        .position_of(id)
        .ok_or_else(|| ApiError::new(StatusCode::NOT_FOUND, "recipe not found"))?;
    let link = EditLink::from_recipe(&store.list()[position], position)?;
    Ok(Json(EditLinkResponse {
        query: link.to_query()?,
        link,
    }))
}

/// GET /api/edit-form?<edit link query> - Decode an edit link into a form prefill.
pub async fn edit_form(RawQuery(query): RawQuery) -> Result<Json<EditForm>, ApiError> {
    let link = EditLink::from_query(query.as_deref().unwrap_or_default())?;
    Ok(Json(link.into_form()?))
}

/// GET /api/recipes/export - The whole collection in import format.
pub async fn export_recipes(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, ApiError> {
    let store = state.store.lock().await;
    let body = store.export()?;
    Ok(([(http::header::CONTENT_TYPE, "application/json")], body))
}

/// GET /api/categories
pub async fn list_categories() -> Json<&'static [&'static str]> {
    Json(KNOWN_CATEGORIES)
}
