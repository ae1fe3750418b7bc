pub mod prelude;

pub mod attendee;
pub mod event;
pub mod event_booking;
