pub use super::attendee::Entity as Attendee;
pub use super::event::Entity as Event;
pub use super::event_booking::Entity as EventBooking;
