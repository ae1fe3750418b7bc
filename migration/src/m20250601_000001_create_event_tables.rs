use sea_orm_migration::{prelude::*, schema::*};

use crate::iden::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create Attendee Table
        let table = table_auto(Attendee::Table)
            .col(pk_auto(Attendee::Id))
            .col(string(Attendee::Email))
            .col(string_len(Attendee::FirstName, 50))
            .col(string_len(Attendee::LastName, 50))
            .to_owned();
        manager.create_table(table).await?;

        // Create Event Table. The page reference outlives the page itself, so
        // it is a plain nullable column rather than a foreign key.
        let table = table_auto(Event::Table)
            .col(pk_auto(Event::Id))
            .col(integer_null(Event::EventPageId))
            .col(string_len(Event::EventName, 300))
            .col(timestamp_with_time_zone(Event::EventDate))
            .col(boolean(Event::IsLiveEvent).default(false))
            .col(boolean(Event::CanRegister).default(true))
            .to_owned();
        manager.create_table(table).await?;

        // Create EventBooking Table
        let table = table_auto(EventBooking::Table)
            .col(pk_auto(EventBooking::Id))
            .col(integer_null(EventBooking::EventId))
            .col(integer(EventBooking::AttendeeId))
            .col(
                timestamp_with_time_zone(EventBooking::TimeRegistered)
                    .default(Expr::current_timestamp()),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk_event_booking_event")
                    .from(EventBooking::Table, EventBooking::EventId)
                    .to(Event::Table, Event::Id)
                    .on_delete(ForeignKeyAction::SetNull),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk_event_booking_attendee")
                    .from(EventBooking::Table, EventBooking::AttendeeId)
                    .to(Attendee::Table, Attendee::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        manager.create_table(table).await?;

        // One event per source page
        manager
            .create_index(
                Index::create()
                    .name("idx_event_page_unique")
                    .table(Event::Table)
                    .col(Event::EventPageId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // One booking per (event, attendee)
        manager
            .create_index(
                Index::create()
                    .name("idx_event_booking_unique")
                    .table(EventBooking::Table)
                    .col(EventBooking::EventId)
                    .col(EventBooking::AttendeeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_event_booking_attendee")
                    .table(EventBooking::Table)
                    .col(EventBooking::AttendeeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_event_date")
                    .table(Event::Table)
                    .col(Event::EventDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop the join table first so the foreign keys go with it
        manager
            .drop_table(Table::drop().table(EventBooking::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Event::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Attendee::Table).to_owned())
            .await?;

        Ok(())
    }
}
