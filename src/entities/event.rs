use std::fmt;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Mirror of a published event page. Created the first time the page is
/// published with registration enabled.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub event_page_id: Option<i32>,
    pub event_name: String,
    pub event_date: DateTimeUtc,
    /// In person, as opposed to virtual.
    pub is_live_event: bool,
    pub can_register: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::event_booking::Entity")]
    EventBooking,
}

impl Related<super::event_booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventBooking.def()
    }
}

impl Related<super::attendee::Entity> for Entity {
    fn to() -> RelationDef {
        super::event_booking::Relation::Attendee.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::event_booking::Relation::Event.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// e.g. `Sun, June 01, 2025`
    pub fn display_date(&self) -> String {
        self.event_date.format("%a, %B %d, %Y").to_string()
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.event_name, self.display_date())
    }
}
