//! Hooks called by the CMS when event pages are published, unpublished or
//! deleted.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use super::AppError;
use crate::{
    entities::event,
    registration::{self, Reconciliation},
    router::AppState,
    source::EventPage,
};

pub async fn publish_event(
    State(state): State<AppState>,
    Json(page): Json<EventPage>,
) -> Result<Json<Reconciliation>, AppError> {
    let outcome = registration::make_or_update(&state.db, &page).await?;
    Ok(Json(outcome))
}

pub async fn close_event(
    State(state): State<AppState>,
    Json(page): Json<EventPage>,
) -> Result<Json<event::Model>, AppError> {
    let event = registration::remove_registration(&state.db, &page).await?;
    Ok(Json(event))
}

pub async fn delete_page(
    State(state): State<AppState>,
    Path(page_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    match registration::detach_source(&state.db, page_id).await? {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Ok(StatusCode::NOT_FOUND),
    }
}
