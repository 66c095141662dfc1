//! In-memory storage implementation

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use crate::domain::participant::Participant;
use crate::domain::{DomainError, DomainResult, Event, EventFilter, EventRepository, UserValidity};
use crate::shared::{CancellationSignal, PaginatedResult};

/// In-memory event and user store for development and testing.
///
/// Implements both [`EventRepository`] and [`UserValidity`], so a single
/// `Arc<InMemoryEventStore>` can back both service collaborators.
pub struct InMemoryEventStore {
    events: DashMap<Uuid, Event>,
    /// user id -> active flag
    users: DashMap<Uuid, bool>,
    reads: AtomicU64,
    writes: AtomicU64,
    read_only: AtomicBool,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self {
            events: DashMap::new(),
            users: DashMap::new(),
            reads: AtomicU64::new(0),
            writes: AtomicU64::new(0),
            read_only: AtomicBool::new(false),
        }
    }

    /// Add a user with a fresh id and return it.
    pub fn register_user(&self, active: bool) -> Uuid {
        let id = Uuid::new_v4();
        self.users.insert(id, active);
        id
    }

    pub fn set_user_active(&self, user_id: Uuid, active: bool) {
        self.users.insert(user_id, active);
    }

    /// While set, every write reports zero affected rows and changes nothing.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    /// Number of event reads served so far
    pub fn read_count(&self) -> u64 {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of event writes attempted so far
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    fn record_read(&self) {
        self.reads.fetch_add(1, Ordering::SeqCst);
    }

    /// Count the write and report whether it may proceed.
    fn begin_write(&self) -> bool {
        self.writes.fetch_add(1, Ordering::SeqCst);
        !self.read_only.load(Ordering::SeqCst)
    }

    fn sorted(mut events: Vec<Event>) -> Vec<Event> {
        events.sort_by(|a, b| {
            a.start_date
                .cmp(&b.start_date)
                .then(a.created_at.cmp(&b.created_at))
                .then(a.id.cmp(&b.id))
        });
        events
    }

    /// Copy without the participant list, matching what a plain row read
    /// returns.
    fn detached(event: &Event) -> Event {
        Event {
            participants: Vec::new(),
            ..event.clone()
        }
    }
}

impl Default for InMemoryEventStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventStore {
    async fn create(&self, event: Event, cancel: &CancellationSignal) -> DomainResult<u64> {
        cancel.check()?;
        if !self.begin_write() {
            return Ok(0);
        }
        if self.events.contains_key(&event.id) {
            return Err(DomainError::Conflict(format!("event {}", event.id)));
        }
        debug!(event_id = %event.id, "Storing event");
        self.events.insert(event.id, event);
        Ok(1)
    }

    async fn get_by_id(&self, id: Uuid, cancel: &CancellationSignal) -> DomainResult<Option<Event>> {
        cancel.check()?;
        self.record_read();
        Ok(self.events.get(&id).map(|e| Self::detached(e.value())))
    }

    async fn update(&self, event: Event, cancel: &CancellationSignal) -> DomainResult<u64> {
        cancel.check()?;
        if !self.begin_write() {
            return Ok(0);
        }
        let Some(mut stored) = self.events.get_mut(&event.id) else {
            return Ok(0);
        };
        // Participant relations belong to storage and survive updates, as do
        // the organizer and creation time
        let participants = std::mem::take(&mut stored.participants);
        *stored = Event {
            organizer_id: stored.organizer_id,
            created_at: stored.created_at,
            participants,
            ..event
        };
        Ok(1)
    }

    async fn delete(&self, id: Uuid, cancel: &CancellationSignal) -> DomainResult<u64> {
        cancel.check()?;
        if !self.begin_write() {
            return Ok(0);
        }
        Ok(self.events.remove(&id).map_or(0, |_| 1))
    }

    async fn get_all(&self, filter: &EventFilter, cancel: &CancellationSignal) -> DomainResult<Vec<Event>> {
        cancel.check()?;
        self.record_read();
        let matching = self
            .events
            .iter()
            .filter(|e| filter.matches(e.value()))
            .map(|e| Self::detached(e.value()))
            .collect();
        Ok(Self::sorted(matching))
    }

    async fn get_all_paginated(
        &self,
        page: u64,
        page_size: u64,
        cancel: &CancellationSignal,
    ) -> DomainResult<PaginatedResult<Event>> {
        cancel.check()?;
        self.record_read();
        let all = Self::sorted(self.events.iter().map(|e| Self::detached(e.value())).collect());
        let total = all.len() as u64;
        let offset = PaginatedResult::<Event>::offset(page, page_size);
        let items = all
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(page_size).unwrap_or(usize::MAX))
            .collect();
        Ok(PaginatedResult::new(items, total, page, page_size))
    }

    async fn get_with_participants(
        &self,
        id: Uuid,
        cancel: &CancellationSignal,
    ) -> DomainResult<Option<Event>> {
        cancel.check()?;
        self.record_read();
        Ok(self.events.get(&id).map(|e| e.value().clone()))
    }

    async fn get_participant_count(&self, id: Uuid, cancel: &CancellationSignal) -> DomainResult<Option<u64>> {
        cancel.check()?;
        self.record_read();
        Ok(self.events.get(&id).map(|e| e.participants.len() as u64))
    }

    async fn add_participant(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        cancel: &CancellationSignal,
    ) -> DomainResult<u64> {
        cancel.check()?;
        if !self.begin_write() {
            return Ok(0);
        }
        let mut event = self
            .events
            .get_mut(&event_id)
            .ok_or_else(|| DomainError::not_found("Event", "id", event_id))?;
        if event.has_participant(user_id) {
            return Err(DomainError::Conflict(format!(
                "user {} already participates in event {}",
                user_id, event_id
            )));
        }
        event.participants.push(Participant::new(event_id, user_id));
        Ok(1)
    }
}

#[async_trait]
impl UserValidity for InMemoryEventStore {
    async fn is_valid(&self, user_id: Uuid, cancel: &CancellationSignal) -> DomainResult<bool> {
        cancel.check()?;
        Ok(self.users.get(&user_id).map_or(false, |active| *active))
    }
}

#[cfg(test)]
impl InMemoryEventStore {
    /// Insert an event directly, bypassing the counters.
    pub(crate) fn seed_event(
        &self,
        organizer_id: Uuid,
        start: chrono::DateTime<chrono::FixedOffset>,
        end: chrono::DateTime<chrono::FixedOffset>,
    ) -> Uuid {
        let now = chrono::Utc::now();
        let event = Event {
            id: Uuid::new_v4(),
            organizer_id,
            name: "Seeded".into(),
            description: String::new(),
            start_date: start,
            end_date: end,
            location: "Somewhere".into(),
            timezone: "UTC".into(),
            participants: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        let id = event.id;
        self.events.insert(id, event);
        id
    }

    pub(crate) fn join(&self, event_id: Uuid, user_id: Uuid) {
        if let Some(mut event) = self.events.get_mut(&event_id) {
            event.participants.push(Participant::new(event_id, user_id));
        }
    }

    pub(crate) fn find(&self, id: Uuid) -> Option<Event> {
        self.events.get(&id).map(|e| e.value().clone())
    }

    pub(crate) fn all_events(&self) -> Vec<Event> {
        self.events.iter().map(|e| e.value().clone()).collect()
    }

    pub(crate) fn event_count(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset, TimeZone};

    fn at(day: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 4, day, 0, 0, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn create_then_get_round_trip() {
        let store = InMemoryEventStore::new();
        let cancel = CancellationSignal::new();
        let id = store.seed_event(Uuid::new_v4(), at(1), at(2));
        let event = store.find(id).unwrap();
        store.events.clear();

        assert_eq!(store.create(event.clone(), &cancel).await.unwrap(), 1);
        assert_eq!(store.get_by_id(id, &cancel).await.unwrap(), Some(event.clone()));
        assert!(store.create(event, &cancel).await.is_err());
    }

    #[tokio::test]
    async fn update_keeps_participants() {
        let store = InMemoryEventStore::new();
        let cancel = CancellationSignal::new();
        let id = store.seed_event(Uuid::new_v4(), at(1), at(2));
        let guest = Uuid::new_v4();
        store.add_participant(id, guest, &cancel).await.unwrap();

        let mut edited = store.get_by_id(id, &cancel).await.unwrap().unwrap();
        assert!(edited.participants.is_empty());
        edited.name = "Edited".into();
        assert_eq!(store.update(edited, &cancel).await.unwrap(), 1);

        let stored = store.find(id).unwrap();
        assert_eq!(stored.name, "Edited");
        assert!(stored.has_participant(guest));
    }

    #[tokio::test]
    async fn writes_to_missing_rows_affect_nothing() {
        let store = InMemoryEventStore::new();
        let cancel = CancellationSignal::new();
        let id = store.seed_event(Uuid::new_v4(), at(1), at(2));
        let ghost = Event {
            id: Uuid::new_v4(),
            ..store.find(id).unwrap()
        };

        assert_eq!(store.update(ghost, &cancel).await.unwrap(), 0);
        assert_eq!(store.delete(Uuid::new_v4(), &cancel).await.unwrap(), 0);
        assert_eq!(store.delete(id, &cancel).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn duplicate_participant_is_conflict() {
        let store = InMemoryEventStore::new();
        let cancel = CancellationSignal::new();
        let id = store.seed_event(Uuid::new_v4(), at(1), at(2));
        let guest = Uuid::new_v4();

        assert_eq!(store.add_participant(id, guest, &cancel).await.unwrap(), 1);
        let err = store.add_participant(id, guest, &cancel).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let err = store
            .add_participant(Uuid::new_v4(), guest, &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert_eq!(store.get_participant_count(id, &cancel).await.unwrap(), Some(1));
        assert_eq!(store.get_participant_count(Uuid::new_v4(), &cancel).await.unwrap(), None);
    }

    #[tokio::test]
    async fn pagination_slices_sorted_events() {
        let store = InMemoryEventStore::new();
        let cancel = CancellationSignal::new();
        let owner = Uuid::new_v4();
        let late = store.seed_event(owner, at(9), at(9));
        let early = store.seed_event(owner, at(1), at(1));
        let middle = store.seed_event(owner, at(5), at(5));

        let first = store.get_all_paginated(1, 2, &cancel).await.unwrap();
        let ids: Vec<Uuid> = first.items.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![early, middle]);
        assert_eq!(first.total, 3);
        assert_eq!(first.total_pages, 2);

        let second = store.get_all_paginated(2, 2, &cancel).await.unwrap();
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.items[0].id, late);
    }

    #[tokio::test]
    async fn user_validity_requires_active_account() {
        let store = InMemoryEventStore::new();
        let cancel = CancellationSignal::new();
        let user = store.register_user(true);

        assert!(store.is_valid(user, &cancel).await.unwrap());
        store.set_user_active(user, false);
        assert!(!store.is_valid(user, &cancel).await.unwrap());
        assert!(!store.is_valid(Uuid::new_v4(), &cancel).await.unwrap());
    }

    #[tokio::test]
    async fn cancelled_calls_fail_fast() {
        let store = InMemoryEventStore::new();
        let cancel = CancellationSignal::new();
        cancel.cancel();

        let err = store.get_all(&EventFilter::all(), &cancel).await.unwrap_err();
        assert!(matches!(err, DomainError::Cancelled));
        assert_eq!(store.read_count(), 0);
    }
}
