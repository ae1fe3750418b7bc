#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    Seaorm(#[from] sea_orm::DbErr),

    #[error("No event registered for page {0}")]
    EventNotFound(i32),

    #[error("Attendee {0} not found")]
    AttendeeNotFound(i32),

    #[error("Invalid attendee: {0}")]
    InvalidAttendee(#[from] garde::Report),

    #[error("Events not open for registration: {0:?}")]
    EventsNotOpen(Vec<i32>),
}
