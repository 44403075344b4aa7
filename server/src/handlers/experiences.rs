use axum::extract::{Path, State};
use axum::Json;

use crate::models::Experience;
use crate::state::AppState;
use crate::utils::error::AppError;

/// `GET /experiences`
pub async fn list_experiences(
    State(state): State<AppState>,
) -> Result<Json<Vec<Experience>>, AppError> {
    Ok(Json(state.catalog.list().await?))
}

/// `GET /experiences/:id`
pub async fn get_experience(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Experience>, AppError> {
    Ok(Json(state.catalog.get(&id).await?))
}
