mod common;

use common::{at, page, seed_event, test_db};
use event_registration::{
    RegistryError,
    entities::{event, prelude::*},
    registration::{self, EventField, Reconciliation},
};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait, PaginatorTrait};

#[tokio::test]
async fn disabled_page_leaves_events_untouched() {
    let db = test_db().await;
    let mut gala = page(1, "Annual Gala", vec![at(2025, 6, 1)]);
    gala.registration_enabled = false;

    let outcome = registration::make_or_update(&db, &gala).await.unwrap();

    assert_eq!(outcome, Reconciliation::RegistrationDisabled);
    assert_eq!(Event::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn disabled_page_does_not_close_existing_event() {
    let db = test_db().await;
    let created = seed_event(&db, 1, "Annual Gala", at(2025, 6, 1)).await;
    let mut gala = page(1, "Renamed Gala", vec![at(2025, 6, 1)]);
    gala.registration_enabled = false;

    registration::make_or_update(&db, &gala).await.unwrap();

    let stored = Event::find_by_id(created.id).one(&db).await.unwrap().unwrap();
    assert_eq!(stored, created);
}

#[tokio::test]
async fn page_without_occurrences_leaves_events_untouched() {
    let db = test_db().await;
    let gala = page(1, "Annual Gala", vec![]);

    let outcome = registration::make_or_update(&db, &gala).await.unwrap();

    assert_eq!(outcome, Reconciliation::NoUpcomingOccurrence);
    assert_eq!(Event::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn repeated_reconcile_writes_once() {
    let db = test_db().await;
    let gala = page(1, "Annual Gala", vec![at(2025, 6, 1), at(2025, 7, 1)]);

    let first = registration::make_or_update(&db, &gala).await.unwrap();
    let second = registration::make_or_update(&db, &gala).await.unwrap();

    assert!(first.wrote());
    assert!(!second.wrote());
    assert!(matches!(second, Reconciliation::Unchanged { .. }));
    assert_eq!(first.event(), second.event());
    assert_eq!(Event::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn annual_gala_updates_only_live_flag() {
    let db = test_db().await;
    let mut gala = page(1, "Annual Gala", vec![at(2025, 6, 1)]);

    let Reconciliation::Created { event: created } =
        registration::make_or_update(&db, &gala).await.unwrap()
    else {
        panic!("expected a new event");
    };
    assert_eq!(created.event_page_id, Some(1));
    assert_eq!(created.event_name, "Annual Gala");
    assert_eq!(created.event_date, at(2025, 6, 1));
    assert!(!created.is_live_event);
    assert!(created.can_register);

    gala.is_live = true;
    let Reconciliation::Updated { event, changed } =
        registration::make_or_update(&db, &gala).await.unwrap()
    else {
        panic!("expected an update");
    };
    assert_eq!(changed, vec![EventField::IsLive]);
    assert_eq!(event.id, created.id);
    assert!(event.is_live_event);
    assert_eq!(event.event_name, created.event_name);
    assert_eq!(event.event_date, created.event_date);
    assert_eq!(event.created_at, created.created_at);
}

#[tokio::test]
async fn next_occurrence_moves_event_date() {
    let db = test_db().await;
    seed_event(&db, 1, "Book Club", at(2025, 6, 1)).await;

    let outcome = registration::make_or_update(&db, &page(1, "Book Club", vec![at(2025, 7, 1)]))
        .await
        .unwrap();

    match outcome {
        Reconciliation::Updated { event, changed } => {
            assert_eq!(changed, vec![EventField::Date]);
            assert_eq!(event.event_date, at(2025, 7, 1));
        }
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[tokio::test]
async fn reconcile_reopens_closed_registration() {
    let db = test_db().await;
    let gala = page(1, "Annual Gala", vec![at(2025, 6, 1)]);
    seed_event(&db, 1, "Annual Gala", at(2025, 6, 1)).await;
    registration::remove_registration(&db, &gala).await.unwrap();

    let outcome = registration::make_or_update(&db, &gala).await.unwrap();

    match outcome {
        Reconciliation::Updated { event, changed } => {
            assert_eq!(changed, vec![EventField::CanRegister]);
            assert!(event.can_register);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[tokio::test]
async fn remove_registration_closes_event() {
    let db = test_db().await;
    let created = seed_event(&db, 1, "Annual Gala", at(2025, 6, 1)).await;

    let closed = registration::remove_registration(&db, &page(1, "Annual Gala", vec![]))
        .await
        .unwrap();

    assert_eq!(closed.id, created.id);
    assert!(!closed.can_register);
    let stored = Event::find_by_id(created.id).one(&db).await.unwrap().unwrap();
    assert!(!stored.can_register);
}

#[tokio::test]
async fn remove_registration_without_event_is_not_found() {
    let db = test_db().await;

    let result = registration::remove_registration(&db, &page(7, "Ghost", vec![])).await;

    assert!(matches!(result, Err(RegistryError::EventNotFound(7))));
    assert_eq!(Event::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn detached_event_survives_page_deletion() {
    let db = test_db().await;
    let created = seed_event(&db, 1, "Annual Gala", at(2025, 6, 1)).await;

    let detached = registration::detach_source(&db, 1).await.unwrap().unwrap();
    assert_eq!(detached.id, created.id);
    assert_eq!(detached.event_page_id, None);
    assert!(registration::detach_source(&db, 1).await.unwrap().is_none());

    // A page reusing the id starts a fresh event.
    let recreated = seed_event(&db, 1, "Annual Gala", at(2025, 6, 1)).await;
    assert_ne!(recreated.id, created.id);
    assert_eq!(Event::find().count(&db).await.unwrap(), 2);
}

#[tokio::test]
async fn storage_rejects_second_event_for_page() {
    let db = test_db().await;
    seed_event(&db, 1, "Annual Gala", at(2025, 6, 1)).await;

    let duplicate = event::ActiveModel {
        event_page_id: Set(Some(1)),
        event_name: Set("Annual Gala".to_string()),
        event_date: Set(at(2025, 6, 1)),
        is_live_event: Set(false),
        can_register: Set(true),
        ..Default::default()
    }
    .insert(&db)
    .await;

    assert!(duplicate.is_err());
}

#[tokio::test]
async fn open_events_exclude_closed_and_past() {
    let db = test_db().await;
    let later = seed_event(&db, 1, "Later", at(2099, 9, 1)).await;
    let sooner = seed_event(&db, 2, "Sooner", at(2099, 3, 1)).await;
    seed_event(&db, 3, "Past", at(2000, 1, 1)).await;
    seed_event(&db, 4, "Closed", at(2099, 5, 1)).await;
    registration::remove_registration(&db, &page(4, "Closed", vec![]))
        .await
        .unwrap();

    let open = registration::open_for_registration(&db, at(2026, 1, 1))
        .await
        .unwrap();

    let ids: Vec<i32> = open.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![sooner.id, later.id]);
}

#[tokio::test]
async fn sub_microsecond_dates_reconcile_once() {
    let db = test_db().await;
    let precise = at(2025, 6, 1) + chrono::Duration::nanoseconds(1_234_567);
    let gala = page(1, "Annual Gala", vec![precise]);

    let first = registration::make_or_update(&db, &gala).await.unwrap();
    let second = registration::make_or_update(&db, &gala).await.unwrap();

    assert_eq!(
        first.event().unwrap().event_date,
        at(2025, 6, 1) + chrono::Duration::microseconds(1_234)
    );
    assert!(first.wrote());
    assert!(!second.wrote());
}
