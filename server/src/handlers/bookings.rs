use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::warn;

use crate::models::{Booking, NewBooking};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{flat_success, FlatResponse};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBooking {
    pub ref_id: String,
    pub booking: Booking,
}

/// `POST /bookings`
///
/// Stores the submitted prices as given; see [`crate::services::BookingService`].
pub async fn create_booking(
    State(state): State<AppState>,
    payload: Result<Json<NewBooking>, JsonRejection>,
) -> Result<Json<FlatResponse<CreatedBooking>>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection, "Rejected booking payload");
        AppError::ValidationError("Invalid booking payload".to_string())
    })?;

    let booking = state.bookings.create(request).await?;
    Ok(flat_success(CreatedBooking {
        ref_id: booking.ref_id.clone(),
        booking,
    }))
}

/// `GET /bookings`
pub async fn list_bookings(State(state): State<AppState>) -> Result<Json<Vec<Booking>>, AppError> {
    Ok(Json(state.bookings.list().await?))
}
