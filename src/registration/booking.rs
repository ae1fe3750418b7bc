use std::fmt;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::entities::{attendee, event, event_booking, prelude::*};
use crate::error::RegistryError;

/// Books `attendee` into every event of `checked_events` they are not already
/// booked into, in a single insert. Unknown event ids are ignored.
///
/// Returns the ids of the newly booked events.
pub async fn add_bookings<C>(
    db: &C,
    attendee: &attendee::Model,
    checked_events: &[i32],
) -> Result<Vec<i32>, RegistryError>
where
    C: TransactionTrait,
{
    let txn = db.begin().await?;

    let prev_bookings: Vec<i32> = attendee
        .find_related(Event)
        .all(&txn)
        .await?
        .into_iter()
        .map(|e| e.id)
        .collect();

    let new_events = Event::find()
        .filter(event::Column::Id.is_in(checked_events.iter().copied()))
        .filter(event::Column::Id.is_not_in(prev_bookings))
        .order_by_asc(event::Column::Id)
        .all(&txn)
        .await?;

    if new_events.is_empty() {
        debug!(attendee_id = attendee.id, "no new bookings");
        return Ok(Vec::new());
    }

    let now = Utc::now();
    let new_bookings = new_events.iter().map(|e| event_booking::ActiveModel {
        event_id: Set(Some(e.id)),
        attendee_id: Set(attendee.id),
        time_registered: Set(now),
        ..Default::default()
    });
    EventBooking::insert_many(new_bookings).exec(&txn).await?;
    txn.commit().await?;

    let booked: Vec<i32> = new_events.into_iter().map(|e| e.id).collect();
    info!(attendee_id = attendee.id, ?booked, "added bookings");
    Ok(booked)
}

/// A booking joined with what it points at.
#[derive(Debug, Clone, Serialize)]
pub struct BookingDetail {
    pub booking: event_booking::Model,
    pub event: Option<event::Model>,
    pub attendee: attendee::Model,
}

impl fmt::Display for BookingDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.event {
            Some(event) => write!(f, "{}: {}", event.event_name, self.attendee),
            None => write!(f, "(removed event): {}", self.attendee),
        }
    }
}

/// Bookings of `attendee_id` for events on or after `now`, soonest first.
pub async fn upcoming_bookings<C>(
    db: &C,
    attendee_id: i32,
    now: DateTime<Utc>,
) -> Result<Vec<BookingDetail>, RegistryError>
where
    C: ConnectionTrait,
{
    let attendee = Attendee::find_by_id(attendee_id)
        .one(db)
        .await?
        .ok_or(RegistryError::AttendeeNotFound(attendee_id))?;

    let bookings = EventBooking::find()
        .filter(event_booking::Column::AttendeeId.eq(attendee_id))
        .find_also_related(Event)
        .filter(event::Column::EventDate.gte(now))
        .order_by_asc(event::Column::EventDate)
        .all(db)
        .await?;

    Ok(bookings
        .into_iter()
        .map(|(booking, event)| BookingDetail {
            booking,
            event,
            attendee: attendee.clone(),
        })
        .collect())
}
