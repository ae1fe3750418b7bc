use chrono::{DateTime, SubsecRound, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, TransactionTrait,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::entities::{event, prelude::*};
use crate::error::RegistryError;
use crate::source::EventSource;

/// Event columns tracked against the source page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventField {
    Name,
    Date,
    IsLive,
    CanRegister,
}

/// What [`make_or_update`] did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Reconciliation {
    RegistrationDisabled,
    NoUpcomingOccurrence,
    Created {
        event: event::Model,
    },
    Updated {
        event: event::Model,
        changed: Vec<EventField>,
    },
    Unchanged {
        event: event::Model,
    },
}

impl Reconciliation {
    /// Whether the event table was written to.
    pub fn wrote(&self) -> bool {
        matches!(self, Self::Created { .. } | Self::Updated { .. })
    }

    pub fn event(&self) -> Option<&event::Model> {
        match self {
            Self::Created { event } | Self::Updated { event, .. } | Self::Unchanged { event } => {
                Some(event)
            }
            _ => None,
        }
    }
}

/// Next occurrence at the microsecond precision the database keeps.
fn next_event_date<S>(source: &S) -> Option<DateTime<Utc>>
where
    S: EventSource + ?Sized,
{
    source.next_occurrence().map(|date| date.trunc_subsecs(6))
}

fn changed_fields<S>(
    existing: &event::Model,
    source: &S,
    event_date: DateTime<Utc>,
) -> Vec<EventField>
where
    S: EventSource + ?Sized,
{
    let mut changed = Vec::new();
    if source.title() != existing.event_name {
        changed.push(EventField::Name);
    }
    if event_date != existing.event_date {
        changed.push(EventField::Date);
    }
    if source.is_live() != existing.is_live_event {
        changed.push(EventField::IsLive);
    }
    if source.registration_enabled() != existing.can_register {
        changed.push(EventField::CanRegister);
    }
    changed
}

async fn find_by_page<C>(conn: &C, page_id: i32) -> Result<Option<event::Model>, RegistryError>
where
    C: ConnectionTrait,
{
    Ok(Event::find()
        .filter(event::Column::EventPageId.eq(page_id))
        .one(conn)
        .await?)
}

/// Creates or updates the event mirroring `source`.
///
/// Nothing happens when the page has registration turned off or no upcoming
/// occurrence. An existing event is only written when a tracked field differs,
/// and then only the differing columns are sent.
pub async fn make_or_update<C, S>(db: &C, source: &S) -> Result<Reconciliation, RegistryError>
where
    C: TransactionTrait,
    S: EventSource + ?Sized,
{
    let page_id = source.page_id();
    if !source.registration_enabled() {
        debug!(page_id, "registration disabled, skipping");
        return Ok(Reconciliation::RegistrationDisabled);
    }
    let Some(event_date) = next_event_date(source) else {
        debug!(page_id, "no upcoming occurrence, skipping");
        return Ok(Reconciliation::NoUpcomingOccurrence);
    };

    let txn = db.begin().await?;
    let outcome = match find_by_page(&txn, page_id).await? {
        Some(existing) => {
            let changed = changed_fields(&existing, source, event_date);
            if changed.is_empty() {
                debug!(page_id, event_id = existing.id, "event up to date");
                Reconciliation::Unchanged { event: existing }
            } else {
                let mut event = existing.into_active_model();
                for field in &changed {
                    match field {
                        EventField::Name => event.event_name = Set(source.title().to_owned()),
                        EventField::Date => event.event_date = Set(event_date),
                        EventField::IsLive => event.is_live_event = Set(source.is_live()),
                        EventField::CanRegister => {
                            event.can_register = Set(source.registration_enabled())
                        }
                    }
                }
                event.updated_at = Set(Utc::now().naive_utc());
                let event = event.update(&txn).await?;
                info!(page_id, event_id = event.id, ?changed, "updated event");
                Reconciliation::Updated { event, changed }
            }
        }
        None => {
            let event = event::ActiveModel {
                event_page_id: Set(Some(page_id)),
                event_name: Set(source.title().to_owned()),
                event_date: Set(event_date),
                is_live_event: Set(source.is_live()),
                can_register: Set(true),
                ..Default::default()
            };
            let event = event.insert(&txn).await?;
            info!(page_id, event_id = event.id, "created event");
            Reconciliation::Created { event }
        }
    };
    txn.commit().await?;

    Ok(outcome)
}

/// Closes registration for the event mirroring `source`.
///
/// Fails with [`RegistryError::EventNotFound`] when the page was never
/// reconciled.
pub async fn remove_registration<C, S>(db: &C, source: &S) -> Result<event::Model, RegistryError>
where
    C: TransactionTrait,
    S: EventSource + ?Sized,
{
    let page_id = source.page_id();
    let txn = db.begin().await?;
    let existing = find_by_page(&txn, page_id)
        .await?
        .ok_or(RegistryError::EventNotFound(page_id))?;

    let mut event = existing.into_active_model();
    event.can_register = Set(false);
    event.updated_at = Set(Utc::now().naive_utc());
    let event = event.update(&txn).await?;
    txn.commit().await?;

    info!(page_id, event_id = event.id, "closed registration");
    Ok(event)
}

/// Drops the page reference of the event mirroring `page_id`, for when the
/// page itself is deleted. The event and its bookings stay.
pub async fn detach_source<C>(db: &C, page_id: i32) -> Result<Option<event::Model>, RegistryError>
where
    C: TransactionTrait,
{
    let txn = db.begin().await?;
    let Some(existing) = find_by_page(&txn, page_id).await? else {
        return Ok(None);
    };

    let mut event = existing.into_active_model();
    event.event_page_id = Set(None);
    event.updated_at = Set(Utc::now().naive_utc());
    let event = event.update(&txn).await?;
    txn.commit().await?;

    info!(page_id, event_id = event.id, "detached event from page");
    Ok(Some(event))
}

/// Events offered on the registration form.
pub async fn open_for_registration<C>(
    db: &C,
    now: DateTime<Utc>,
) -> Result<Vec<event::Model>, RegistryError>
where
    C: ConnectionTrait,
{
    Ok(Event::find()
        .filter(event::Column::CanRegister.eq(true))
        .filter(event::Column::EventDate.gte(now))
        .order_by_asc(event::Column::EventDate)
        .all(db)
        .await?)
}
