use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The publishable page an [`Event`](crate::entities::event) mirrors.
///
/// Occurrences are expected in chronological order; the first one is the
/// next time the event happens.
pub trait EventSource {
    fn page_id(&self) -> i32;
    fn title(&self) -> &str;
    fn registration_enabled(&self) -> bool;
    fn is_live(&self) -> bool;
    fn upcoming_occurrences(&self) -> &[DateTime<Utc>];

    fn next_occurrence(&self) -> Option<DateTime<Utc>> {
        self.upcoming_occurrences().first().copied()
    }
}

/// Event page snapshot sent by the publishing workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventPage {
    pub id: i32,
    pub title: String,
    #[serde(default)]
    pub registration_enabled: bool,
    #[serde(default)]
    pub is_live: bool,
    #[serde(default)]
    pub upcoming_occurrences: Vec<DateTime<Utc>>,
}

impl EventSource for EventPage {
    fn page_id(&self) -> i32 {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn registration_enabled(&self) -> bool {
        self.registration_enabled
    }

    fn is_live(&self) -> bool {
        self.is_live
    }

    fn upcoming_occurrences(&self) -> &[DateTime<Utc>] {
        &self.upcoming_occurrences
    }
}
