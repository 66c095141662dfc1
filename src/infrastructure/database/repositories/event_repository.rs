//! SeaORM implementation of EventRepository

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set, SqlErr,
    TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult, Event, EventFilter, EventRepository, Participant};
use crate::infrastructure::database::entities::{event, participant};
use crate::shared::{CancellationSignal, PaginatedResult, MAX_OFFSET};

pub struct SeaOrmEventRepository {
    db: DatabaseConnection,
}

impl SeaOrmEventRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn event_model_to_domain(model: event::Model, participants: Vec<participant::Model>) -> Event {
    Event {
        id: model.id,
        organizer_id: model.organizer_id,
        name: model.name,
        description: model.description,
        start_date: with_offset(model.start_date, model.start_offset),
        end_date: with_offset(model.end_date, model.end_offset),
        location: model.location,
        timezone: model.timezone,
        participants: participants
            .into_iter()
            .map(participant_model_to_domain)
            .collect(),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// Rebuild the organizer's local time from the stored instant and offset.
fn with_offset(instant: DateTime<Utc>, offset_secs: i32) -> DateTime<FixedOffset> {
    match FixedOffset::east_opt(offset_secs) {
        Some(offset) => instant.with_timezone(&offset),
        None => instant.fixed_offset(),
    }
}

fn offset_secs(at: &DateTime<FixedOffset>) -> i32 {
    at.offset().local_minus_utc()
}

fn participant_model_to_domain(model: participant::Model) -> Participant {
    Participant {
        event_id: model.event_id,
        user_id: model.user_id,
        joined_at: model.joined_at,
    }
}

fn participant_active_model(p: &Participant) -> participant::ActiveModel {
    participant::ActiveModel {
        id: NotSet,
        event_id: Set(p.event_id),
        user_id: Set(p.user_id),
        joined_at: Set(p.joined_at),
    }
}

fn db_err(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => DomainError::Conflict(msg),
        _ => DomainError::Storage(e.to_string()),
    }
}

/// Base query for every event listing: start date, then creation time.
fn ordered(query: Select<event::Entity>) -> Select<event::Entity> {
    query
        .order_by_asc(event::Column::StartDate)
        .order_by_asc(event::Column::CreatedAt)
        .order_by_asc(event::Column::Id)
}

fn apply_filter(mut query: Select<event::Entity>, filter: &EventFilter) -> Select<event::Entity> {
    if let Some(organizer_id) = filter.organizer_id {
        query = query.filter(event::Column::OrganizerId.eq(organizer_id));
    }

    // Both sides are UTC so the comparison is between instants
    if let Some(window) = filter.date_overlap {
        query = query
            .filter(event::Column::StartDate.lte(window.end.with_timezone(&Utc)))
            .filter(event::Column::EndDate.gte(window.start.with_timezone(&Utc)));
    }

    if let Some(user_id) = filter.participant_user_id {
        query = query.filter(
            event::Column::Id.in_subquery(
                Query::select()
                    .column(participant::Column::EventId)
                    .from(participant::Entity)
                    .and_where(participant::Column::UserId.eq(user_id))
                    .to_owned(),
            ),
        );
    }

    query
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl EventRepository for SeaOrmEventRepository {
    async fn create(&self, event: Event, cancel: &CancellationSignal) -> DomainResult<u64> {
        cancel.check()?;
        debug!(event_id = %event.id, "Inserting event");

        let txn = self.db.begin().await.map_err(db_err)?;

        let model = event::ActiveModel {
            id: Set(event.id),
            organizer_id: Set(event.organizer_id),
            name: Set(event.name),
            description: Set(event.description),
            start_date: Set(event.start_date.with_timezone(&Utc)),
            start_offset: Set(offset_secs(&event.start_date)),
            end_date: Set(event.end_date.with_timezone(&Utc)),
            end_offset: Set(offset_secs(&event.end_date)),
            location: Set(event.location),
            timezone: Set(event.timezone),
            created_at: Set(event.created_at),
            updated_at: Set(event.updated_at),
        };
        event::Entity::insert(model)
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if !event.participants.is_empty() {
            participant::Entity::insert_many(event.participants.iter().map(participant_active_model))
                .exec(&txn)
                .await
                .map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;
        Ok(1)
    }

    async fn get_by_id(&self, id: Uuid, cancel: &CancellationSignal) -> DomainResult<Option<Event>> {
        cancel.check()?;
        let model = event::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(|m| event_model_to_domain(m, Vec::new())))
    }

    async fn update(&self, event: Event, cancel: &CancellationSignal) -> DomainResult<u64> {
        cancel.check()?;

        // Organizer and creation time are never rewritten
        let changes = event::ActiveModel {
            id: NotSet,
            organizer_id: NotSet,
            name: Set(event.name),
            description: Set(event.description),
            start_date: Set(event.start_date.with_timezone(&Utc)),
            start_offset: Set(offset_secs(&event.start_date)),
            end_date: Set(event.end_date.with_timezone(&Utc)),
            end_offset: Set(offset_secs(&event.end_date)),
            location: Set(event.location),
            timezone: Set(event.timezone),
            created_at: NotSet,
            updated_at: Set(event.updated_at),
        };

        let result = event::Entity::update_many()
            .set(changes)
            .filter(event::Column::Id.eq(event.id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected)
    }

    async fn delete(&self, id: Uuid, cancel: &CancellationSignal) -> DomainResult<u64> {
        cancel.check()?;
        let txn = self.db.begin().await.map_err(db_err)?;

        participant::Entity::delete_many()
            .filter(participant::Column::EventId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        let result = event::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        Ok(result.rows_affected)
    }

    async fn get_all(&self, filter: &EventFilter, cancel: &CancellationSignal) -> DomainResult<Vec<Event>> {
        cancel.check()?;
        let models = ordered(apply_filter(event::Entity::find(), filter))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models
            .into_iter()
            .map(|m| event_model_to_domain(m, Vec::new()))
            .collect())
    }

    async fn get_all_paginated(
        &self,
        page: u64,
        page_size: u64,
        cancel: &CancellationSignal,
    ) -> DomainResult<PaginatedResult<Event>> {
        cancel.check()?;
        let query = ordered(event::Entity::find());

        let total = query.clone().count(&self.db).await.map_err(db_err)?;

        let models = query
            .offset(PaginatedResult::<Event>::offset(page, page_size))
            .limit(page_size.min(MAX_OFFSET))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let items = models
            .into_iter()
            .map(|m| event_model_to_domain(m, Vec::new()))
            .collect();

        Ok(PaginatedResult::new(items, total, page, page_size))
    }

    async fn get_with_participants(
        &self,
        id: Uuid,
        cancel: &CancellationSignal,
    ) -> DomainResult<Option<Event>> {
        cancel.check()?;
        let Some(model) = event::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let participants = model
            .find_related(participant::Entity)
            .order_by_asc(participant::Column::JoinedAt)
            .order_by_asc(participant::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(Some(event_model_to_domain(model, participants)))
    }

    async fn get_participant_count(&self, id: Uuid, cancel: &CancellationSignal) -> DomainResult<Option<u64>> {
        cancel.check()?;
        let exists = event::Entity::find_by_id(id)
            .count(&self.db)
            .await
            .map_err(db_err)?
            > 0;
        if !exists {
            return Ok(None);
        }

        let count = participant::Entity::find()
            .filter(participant::Column::EventId.eq(id))
            .count(&self.db)
            .await
            .map_err(db_err)?;

        Ok(Some(count))
    }

    async fn add_participant(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        cancel: &CancellationSignal,
    ) -> DomainResult<u64> {
        cancel.check()?;
        let exists = event::Entity::find_by_id(event_id)
            .count(&self.db)
            .await
            .map_err(db_err)?
            > 0;
        if !exists {
            return Err(DomainError::not_found("Event", "id", event_id));
        }

        participant_active_model(&Participant::new(event_id, user_id))
            .insert(&self.db)
            .await
            .map_err(db_err)?;

        Ok(1)
    }
}
