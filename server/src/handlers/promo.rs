use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::warn;

use crate::models::Discount;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{flat_success, FlatResponse};

#[derive(Debug, Deserialize)]
pub struct PromoRequest {
    #[serde(default)]
    pub code: Option<String>,
}

/// `POST /promo`
///
/// Responds with `{success, discountType, discountValue}`.
pub async fn validate_promo(
    State(state): State<AppState>,
    payload: Result<Json<PromoRequest>, JsonRejection>,
) -> Result<Json<FlatResponse<Discount>>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection, "Rejected promo payload");
        AppError::ValidationError("Invalid promo request".to_string())
    })?;

    let discount = state.promos.validate(request.code.as_deref()).await?;
    Ok(flat_success(discount))
}
