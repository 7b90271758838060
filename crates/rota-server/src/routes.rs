//! HTTP handlers for the todo endpoints.
//!
//! Handlers parse and validate input, delegate to the service, and map
//! absent records to [`ApiError::NotFound`]. No business rules live here
//! beyond input parsing and status-code selection.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};

use rota_store::{Todo, TodoCreate, TodoPatch};

use crate::errors::ApiError;
use crate::server::AppState;

/// Query parameters for `GET /api/v1/todos`.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Truncate the result when positive.
    pub limit: Option<i64>,
}

/// GET `/` — static greeting, not part of the todo contract.
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello! Welcome to the rota todo API" }))
}

/// GET `/api/v1/todos`
pub async fn list_todos(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = state.service.list(query.limit).await?;
    Ok(Json(todos))
}

/// GET `/api/v1/todos/{id}`
pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Todo>, ApiError> {
    let todo = state.service.get(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(todo))
}

/// POST `/api/v1/todos`
pub async fn create_todo(
    State(state): State<AppState>,
    Json(input): Json<TodoCreate>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    input.validate()?;
    let todo = state.service.create(input).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// PUT `/api/v1/todos/{id}`
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<TodoPatch>,
) -> Result<Json<Todo>, ApiError> {
    patch.validate()?;
    let todo = state
        .service
        .update(id, patch)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(todo))
}

/// DELETE `/api/v1/todos/{id}` — responds with the pre-deletion snapshot.
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Todo>, ApiError> {
    let todo = state
        .service
        .delete(id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(todo))
}

/// GET `/health`
pub async fn health(
    State(state): State<AppState>,
) -> Result<Json<crate::health::HealthResponse>, ApiError> {
    let todos = state.service.count().await?;
    Ok(Json(crate::health::health_check(state.start_time, todos)))
}
