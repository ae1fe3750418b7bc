#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use event_registration::{
    EventPage,
    database::setup_database,
    entities::{attendee, event},
    registration::{self, NewAttendee},
};
use sea_orm::DatabaseConnection;

pub async fn test_db() -> DatabaseConnection {
    setup_database("sqlite::memory:").await.unwrap()
}

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

pub fn page(id: i32, title: &str, occurrences: Vec<DateTime<Utc>>) -> EventPage {
    EventPage {
        id,
        title: title.to_string(),
        registration_enabled: true,
        is_live: false,
        upcoming_occurrences: occurrences,
    }
}

/// Reconciles a registerable page and returns the created event.
pub async fn seed_event(
    db: &DatabaseConnection,
    page_id: i32,
    title: &str,
    date: DateTime<Utc>,
) -> event::Model {
    let outcome = registration::make_or_update(db, &page(page_id, title, vec![date]))
        .await
        .unwrap();
    outcome.event().cloned().unwrap()
}

pub async fn seed_attendee(db: &DatabaseConnection, first_name: &str) -> attendee::Model {
    registration::create_attendee(
        db,
        &NewAttendee {
            email: format!("{}@example.com", first_name.to_lowercase()),
            first_name: first_name.to_string(),
            last_name: "Tester".to_string(),
        },
    )
    .await
    .unwrap()
}
