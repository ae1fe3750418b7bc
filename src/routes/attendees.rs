use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;

use super::AppError;
use crate::{
    registration::{self, BookingDetail},
    router::AppState,
};

/// Upcoming bookings for an attendee, soonest first.
pub async fn upcoming(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<BookingDetail>>, AppError> {
    let bookings = registration::upcoming_bookings(&state.db, id, Utc::now()).await?;
    Ok(Json(bookings))
}
