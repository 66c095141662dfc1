//! Event repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::filter::EventFilter;
use super::model::Event;
use crate::domain::DomainResult;
use crate::shared::{CancellationSignal, PaginatedResult};

/// Persistence contract for events and their participant relations.
///
/// Write methods report the number of affected rows; the services treat
/// zero as a failed write. Implementations should check `cancel` before
/// starting any I/O.
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: Event, cancel: &CancellationSignal) -> DomainResult<u64>;

    /// Participants are not loaded.
    async fn get_by_id(&self, id: Uuid, cancel: &CancellationSignal)
        -> DomainResult<Option<Event>>;

    async fn update(&self, event: Event, cancel: &CancellationSignal) -> DomainResult<u64>;

    /// Removes the event together with its participant relations.
    async fn delete(&self, id: Uuid, cancel: &CancellationSignal) -> DomainResult<u64>;

    /// Events matching `filter`, ordered by start date.
    async fn get_all(
        &self,
        filter: &EventFilter,
        cancel: &CancellationSignal,
    ) -> DomainResult<Vec<Event>>;

    /// One page of all events ordered by start date. `page` is 1-based.
    async fn get_all_paginated(
        &self,
        page: u64,
        page_size: u64,
        cancel: &CancellationSignal,
    ) -> DomainResult<PaginatedResult<Event>>;

    /// The event with `participants` populated.
    async fn get_with_participants(
        &self,
        id: Uuid,
        cancel: &CancellationSignal,
    ) -> DomainResult<Option<Event>>;

    /// `None` when the event does not exist.
    async fn get_participant_count(
        &self,
        id: Uuid,
        cancel: &CancellationSignal,
    ) -> DomainResult<Option<u64>>;

    /// Storage-level seam for the participant service; the event services
    /// never call it.
    async fn add_participant(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        cancel: &CancellationSignal,
    ) -> DomainResult<u64>;
}
