use chrono::Utc;
use garde::Validate;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, TransactionTrait,
};
use serde::Deserialize;
use tracing::{debug, info};

use super::booking::add_bookings;
use crate::entities::{attendee, event, prelude::*};
use crate::error::RegistryError;

/// Personal details from the registration form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewAttendee {
    #[garde(email)]
    pub email: String,
    #[garde(length(chars, min = 1, max = 50))]
    pub first_name: String,
    #[garde(length(chars, min = 1, max = 50))]
    pub last_name: String,
}

impl NewAttendee {
    /// Copy with surrounding whitespace removed, as stored.
    pub fn trimmed(&self) -> Self {
        Self {
            email: self.email.trim().to_owned(),
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
        }
    }
}

pub async fn create_attendee<C>(db: &C, new: &NewAttendee) -> Result<attendee::Model, RegistryError>
where
    C: TransactionTrait,
{
    let new = new.trimmed();
    new.validate()?;

    let txn = db.begin().await?;
    let attendee = attendee::ActiveModel {
        email: Set(new.email),
        first_name: Set(new.first_name),
        last_name: Set(new.last_name),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    info!(attendee_id = attendee.id, "created attendee");
    Ok(attendee)
}

/// Result of a registration form submission.
#[derive(Debug, Clone)]
pub struct Registration {
    pub attendee: attendee::Model,
    pub booked: Vec<i32>,
}

/// Creates the attendee and books the checked events together; either both
/// land or neither does.
///
/// Every checked event must still be open: registration enabled and not yet
/// happened. Otherwise nothing is written and the offending ids are returned
/// in [`RegistryError::EventsNotOpen`].
pub async fn register<C>(
    db: &C,
    new: &NewAttendee,
    checked_events: &[i32],
) -> Result<Registration, RegistryError>
where
    C: TransactionTrait,
{
    let txn = db.begin().await?;

    let open: Vec<i32> = Event::find()
        .filter(event::Column::Id.is_in(checked_events.iter().copied()))
        .filter(event::Column::CanRegister.eq(true))
        .filter(event::Column::EventDate.gte(Utc::now()))
        .all(&txn)
        .await?
        .into_iter()
        .map(|e| e.id)
        .collect();
    let mut rejected: Vec<i32> = checked_events
        .iter()
        .copied()
        .filter(|id| !open.contains(id))
        .collect();
    if !rejected.is_empty() {
        rejected.sort_unstable();
        rejected.dedup();
        debug!(?rejected, "checked events are not open");
        return Err(RegistryError::EventsNotOpen(rejected));
    }

    let attendee = create_attendee(&txn, new).await?;
    let booked = add_bookings(&txn, &attendee, &open).await?;
    txn.commit().await?;

    Ok(Registration { attendee, booked })
}
