//! Event registration procedures: keeping events in sync with their pages,
//! and booking attendees into them.

pub mod attendee;
pub mod booking;
pub mod event;

pub use attendee::{NewAttendee, Registration, create_attendee, register};
pub use booking::{BookingDetail, add_bookings, upcoming_bookings};
pub use event::{
    EventField, Reconciliation, detach_source, make_or_update, open_for_registration,
    remove_registration,
};
