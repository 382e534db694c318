//! Spacecraft CRUD handlers: create, update, delete, read, list.

use crate::error::AppError;
use crate::json::{write_json, ValidJson};
use crate::model::{SpacecraftFilter, SpacecraftRequest};
use crate::response::{success, success_with_id};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid spacecraft id '{}'", id_str)))
}

pub async fn create(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<SpacecraftRequest>,
) -> Result<Response, AppError> {
    let id = state.repo.create(&body).await?;
    tracing::info!(id, name = %body.name, armament = body.armament.len(), "spacecraft created");
    write_json(StatusCode::CREATED, &success_with_id(id))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    ValidJson(body): ValidJson<SpacecraftRequest>,
) -> Result<Response, AppError> {
    let id = parse_id(&id_str)?;
    state.repo.update(id, &body).await?;
    tracing::info!(id, "spacecraft updated");
    write_json(StatusCode::OK, &success())
}

pub async fn delete(State(state): State<AppState>, Path(id_str): Path<String>) -> Result<Response, AppError> {
    let id = parse_id(&id_str)?;
    state.repo.delete(id).await?;
    tracing::info!(id, "spacecraft deleted");
    write_json(StatusCode::OK, &success())
}

pub async fn read(State(state): State<AppState>, Path(id_str): Path<String>) -> Result<Response, AppError> {
    let id = parse_id(&id_str)?;
    let craft = state.repo.get_by_id(id).await?;
    write_json(StatusCode::OK, &craft)
}

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<SpacecraftFilter>,
) -> Result<Response, AppError> {
    let crafts = state.repo.get(&filter.normalized()).await?;
    write_json(StatusCode::OK, &crafts)
}
