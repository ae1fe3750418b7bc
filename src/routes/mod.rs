use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::RegistryError;

pub mod attendees;
pub mod publishing;
pub mod register;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Template(#[from] minijinja::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Registry(
                e @ (RegistryError::EventNotFound(_) | RegistryError::AttendeeNotFound(_)),
            ) => (StatusCode::NOT_FOUND, e.to_string()).into_response(),
            AppError::Registry(
                e @ (RegistryError::InvalidAttendee(_) | RegistryError::EventsNotOpen(_)),
            ) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
            e => {
                tracing::error!("request failed: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
