use crate::error::ApiError;
use crate::server::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{Value, json};
use travelog_core::TravelogError;
use travelog_core::entry::EntryDraft;

pub async fn list_entries(State(state): State<AppState>) -> Json<Value> {
    let entries = state.store.find_all();
    Json(json!({ "total": entries.len(), "list": entries }))
}

pub async fn create_entry(
    State(state): State<AppState>,
    Json(draft): Json<EntryDraft>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let valid = draft.validate().map_err(TravelogError::Validation)?;
    let entry = state.store.insert(valid)?;
    Ok((StatusCode::CREATED, Json(json!(entry))))
}

pub async fn get_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let entry = state.store.find(&id)?;
    Ok(Json(json!(entry)))
}

pub async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<EntryDraft>,
) -> Result<Json<Value>, ApiError> {
    let valid = draft.validate().map_err(TravelogError::Validation)?;
    let entry = state.store.update(&id, valid)?;
    Ok(Json(json!(entry)))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
