use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
pub enum Attendee {
    Table,
    Id,
    Email,
    FirstName,
    LastName,
}

#[derive(DeriveIden)]
pub enum Event {
    Table,
    Id,
    EventPageId,
    EventName,
    EventDate,
    IsLiveEvent,
    CanRegister,
}

#[derive(DeriveIden)]
pub enum EventBooking {
    Table,
    Id,
    EventId,
    AttendeeId,
    TimeRegistered,
}
