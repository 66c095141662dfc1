//! Event query service
//!
//! Read-only projections over the event repository. An empty list is an
//! error outcome (`EmptyResult`); a zero participant count is not.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use tracing::debug;
use uuid::Uuid;

use super::ensure_user_valid;
use crate::config::PaginationConfig;
use crate::domain::{Event, EventFilter, EventRepository, EventView, EventWithParticipantsView, UserValidity};
use crate::shared::messages;
use crate::shared::{
    is_date_range_valid, normalize_pagination, CancellationSignal, DataResult, Outcome,
    PaginatedResult, Rejection,
};

pub struct EventQueryService<R: EventRepository + ?Sized, U: UserValidity + ?Sized> {
    events: Arc<R>,
    users: Arc<U>,
    pagination: PaginationConfig,
}

impl<R: EventRepository + ?Sized, U: UserValidity + ?Sized> EventQueryService<R, U> {
    pub fn new(events: Arc<R>, users: Arc<U>, pagination: PaginationConfig) -> Self {
        Self {
            events,
            users,
            pagination,
        }
    }

    pub async fn get_by_id(&self, event_id: Uuid, cancel: &CancellationSignal) -> DataResult<EventView> {
        Outcome::from(self.try_get_by_id(event_id, cancel).await)
    }

    async fn try_get_by_id(&self, event_id: Uuid, cancel: &CancellationSignal) -> Result<EventView, Rejection> {
        cancel.check()?;
        self.events
            .get_by_id(event_id, cancel)
            .await?
            .map(EventView::from)
            .ok_or_else(|| Rejection::not_found(messages::EVENT_NOT_FOUND))
    }

    /// Events matching an arbitrary combination of filter criteria.
    pub async fn get_all(&self, filter: &EventFilter, cancel: &CancellationSignal) -> DataResult<Vec<EventView>> {
        Outcome::from(self.filtered(filter, cancel).await)
    }

    /// One page of all events. Out-of-range arguments are clamped to the
    /// configured limits.
    pub async fn get_all_with_pagination(
        &self,
        page: u64,
        page_size: u64,
        cancel: &CancellationSignal,
    ) -> DataResult<PaginatedResult<EventView>> {
        Outcome::from(self.try_paginated(page, page_size, cancel).await)
    }

    async fn try_paginated(
        &self,
        page: u64,
        page_size: u64,
        cancel: &CancellationSignal,
    ) -> Result<PaginatedResult<EventView>, Rejection> {
        let (page, page_size) = normalize_pagination(page, page_size, &self.pagination);
        cancel.check()?;
        let result = self.events.get_all_paginated(page, page_size, cancel).await?;
        if result.is_empty() {
            debug!(page, page_size, "Requested page has no events");
            return Err(Rejection::empty(messages::EMPTY_EVENT_LIST));
        }
        Ok(result.map(EventView::from))
    }

    /// Event plus participants. An event nobody joined yet is reported as
    /// an empty participant list.
    pub async fn get_with_participants(
        &self,
        event_id: Uuid,
        cancel: &CancellationSignal,
    ) -> DataResult<EventWithParticipantsView> {
        Outcome::from(self.try_with_participants(event_id, cancel).await)
    }

    async fn try_with_participants(
        &self,
        event_id: Uuid,
        cancel: &CancellationSignal,
    ) -> Result<EventWithParticipantsView, Rejection> {
        cancel.check()?;
        let event = self
            .events
            .get_with_participants(event_id, cancel)
            .await?
            .ok_or_else(|| Rejection::not_found(messages::EVENT_NOT_FOUND))?;

        if event.participants.is_empty() {
            return Err(Rejection::empty(messages::EMPTY_PARTICIPANT_LIST));
        }
        Ok(EventWithParticipantsView::from(event))
    }

    /// Events whose interval overlaps `[start, end]`.
    pub async fn get_by_date_range(
        &self,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
        cancel: &CancellationSignal,
    ) -> DataResult<Vec<EventView>> {
        if !is_date_range_valid(&start, &end) {
            return Outcome::from(Rejection::invalid_input(messages::START_AFTER_END));
        }
        Outcome::from(self.filtered(&EventFilter::overlapping(start, end), cancel).await)
            .with_message(messages::EVENTS_RETRIEVED)
    }

    pub async fn get_organized_by_user(&self, user_id: Uuid, cancel: &CancellationSignal) -> DataResult<Vec<EventView>> {
        Outcome::from(self.for_user(user_id, EventFilter::organized_by(user_id), cancel).await)
    }

    pub async fn get_participated_by_user(&self, user_id: Uuid, cancel: &CancellationSignal) -> DataResult<Vec<EventView>> {
        Outcome::from(self.for_user(user_id, EventFilter::participated_by(user_id), cancel).await)
    }

    /// Participant count, zero included. Only a missing event is an error.
    pub async fn get_participant_count(&self, event_id: Uuid, cancel: &CancellationSignal) -> DataResult<u64> {
        Outcome::from(self.try_participant_count(event_id, cancel).await)
            .with_message(messages::PARTICIPANT_COUNT_RETRIEVED)
    }

    async fn try_participant_count(&self, event_id: Uuid, cancel: &CancellationSignal) -> Result<u64, Rejection> {
        cancel.check()?;
        self.events
            .get_participant_count(event_id, cancel)
            .await?
            .ok_or_else(|| Rejection::not_found(messages::EVENT_NOT_FOUND))
    }

    // ── Helpers ─────────────────────────────────────────────────

    async fn for_user(
        &self,
        user_id: Uuid,
        filter: EventFilter,
        cancel: &CancellationSignal,
    ) -> Result<Vec<EventView>, Rejection> {
        ensure_user_valid(self.users.as_ref(), user_id, cancel).await?;
        self.filtered(&filter, cancel).await
    }

    async fn filtered(&self, filter: &EventFilter, cancel: &CancellationSignal) -> Result<Vec<EventView>, Rejection> {
        cancel.check()?;
        let events = self.events.get_all(filter, cancel).await?;
        non_empty(events)
    }
}

fn non_empty(events: Vec<Event>) -> Result<Vec<EventView>, Rejection> {
    if events.is_empty() {
        return Err(Rejection::empty(messages::EMPTY_EVENT_LIST));
    }
    Ok(events.into_iter().map(EventView::from).collect())
}
