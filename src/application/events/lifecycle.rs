//! Event lifecycle service: create, update, delete
//!
//! The only writer of event state. Every rule check happens before the
//! repository write, so a rejected call never touches storage.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use super::{ensure_user_valid, validation_rejection};
use crate::domain::{apply_update, CreateEventDto, Event, EventRepository, UpdateEventDto, UserValidity};
use crate::shared::messages;
use crate::shared::{is_date_range_valid, CancellationSignal, Outcome, Rejection, ServiceResult};

/// Generic over the repository and the user collaborator so it stays
/// decoupled from the concrete persistence layer.
pub struct EventLifecycleService<R: EventRepository + ?Sized, U: UserValidity + ?Sized> {
    events: Arc<R>,
    users: Arc<U>,
}

impl<R: EventRepository + ?Sized, U: UserValidity + ?Sized> EventLifecycleService<R, U> {
    pub fn new(events: Arc<R>, users: Arc<U>) -> Self {
        Self { events, users }
    }

    // ── Create ──────────────────────────────────────────────────

    /// Create an event owned by `acting_user`.
    ///
    /// Any organizer given in the draft is discarded.
    pub async fn create(
        &self,
        draft: CreateEventDto,
        acting_user: Uuid,
        cancel: &CancellationSignal,
    ) -> ServiceResult {
        Outcome::from(self.try_create(draft, acting_user, cancel).await)
            .with_message(messages::CREATE_EVENT_SUCCESS)
    }

    async fn try_create(
        &self,
        draft: CreateEventDto,
        acting_user: Uuid,
        cancel: &CancellationSignal,
    ) -> Result<(), Rejection> {
        ensure_user_valid(self.users.as_ref(), acting_user, cancel).await?;

        if !is_date_range_valid(&draft.start_date, &draft.end_date) {
            warn!(user_id = %acting_user, "Rejected event draft with start after end");
            return Err(Rejection::invalid_input(messages::INVALID_DATE_RANGE));
        }
        draft.validate().map_err(validation_rejection)?;

        if let Some(claimed) = draft.organizer_id.filter(|id| *id != acting_user) {
            warn!(user_id = %acting_user, claimed = %claimed, "Ignoring organizer from draft");
        }
        let event = draft.into_event(acting_user);
        let event_id = event.id;

        cancel.check()?;
        let affected = self.events.create(event, cancel).await?;
        if affected == 0 {
            return Err(Rejection::persistence(messages::CREATE_EVENT_ERROR));
        }

        info!(event_id = %event_id, organizer_id = %acting_user, "Event created");
        Ok(())
    }

    // ── Delete ──────────────────────────────────────────────────

    /// Delete an event. Only its organizer may do so.
    pub async fn delete(
        &self,
        event_id: Uuid,
        acting_user: Uuid,
        cancel: &CancellationSignal,
    ) -> ServiceResult {
        Outcome::from(self.try_delete(event_id, acting_user, cancel).await)
            .with_message(messages::DELETE_EVENT_SUCCESS)
    }

    async fn try_delete(
        &self,
        event_id: Uuid,
        acting_user: Uuid,
        cancel: &CancellationSignal,
    ) -> Result<(), Rejection> {
        self.load_owned(event_id, acting_user, cancel).await?;

        cancel.check()?;
        let affected = self.events.delete(event_id, cancel).await?;
        if affected == 0 {
            return Err(Rejection::persistence(messages::DELETE_EVENT_ERROR));
        }

        info!(event_id = %event_id, user_id = %acting_user, "Event deleted");
        Ok(())
    }

    // ── Update ──────────────────────────────────────────────────

    /// Replace the editable fields of an event. Only its organizer may do
    /// so, and the organizer itself never changes.
    pub async fn update(
        &self,
        update: UpdateEventDto,
        acting_user: Uuid,
        cancel: &CancellationSignal,
    ) -> ServiceResult {
        Outcome::from(self.try_update(update, acting_user, cancel).await)
            .with_message(messages::UPDATE_EVENT_SUCCESS)
    }

    async fn try_update(
        &self,
        update: UpdateEventDto,
        acting_user: Uuid,
        cancel: &CancellationSignal,
    ) -> Result<(), Rejection> {
        let stored = self.load_owned(update.id, acting_user, cancel).await?;

        // Validate the merged candidate; `stored` is never modified.
        let candidate = apply_update(&stored, &update);
        if !is_date_range_valid(&candidate.start_date, &candidate.end_date) {
            warn!(event_id = %update.id, "Rejected update with start after end");
            return Err(Rejection::invalid_input(messages::INVALID_DATE_RANGE));
        }
        update.validate().map_err(validation_rejection)?;

        cancel.check()?;
        let affected = self.events.update(candidate, cancel).await?;
        if affected == 0 {
            return Err(Rejection::persistence(messages::UPDATE_EVENT_ERROR));
        }

        info!(event_id = %update.id, user_id = %acting_user, "Event updated");
        Ok(())
    }

    // ── Helpers ─────────────────────────────────────────────────

    /// Load an event and check that `acting_user` organizes it.
    async fn load_owned(
        &self,
        event_id: Uuid,
        acting_user: Uuid,
        cancel: &CancellationSignal,
    ) -> Result<Event, Rejection> {
        cancel.check()?;
        let event = self
            .events
            .get_by_id(event_id, cancel)
            .await?
            .ok_or_else(|| Rejection::not_found(messages::EVENT_NOT_FOUND))?;

        if !event.is_organized_by(acting_user) {
            warn!(event_id = %event_id, user_id = %acting_user, "Non-organizer tried to modify event");
            return Err(Rejection::unauthorized(messages::UNAUTHORIZED_ACCESS));
        }
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::events::test_support::*;
    use crate::shared::ErrorKind;

    #[tokio::test]
    async fn create_rejects_start_after_end_without_writing() {
        let (store, lifecycle, _) = services();
        let owner = store.register_user(true);

        let draft = draft_between(ts(2024, 1, 10), ts(2024, 1, 9));
        let result = lifecycle.create(draft, owner, &CancellationSignal::new()).await;

        assert_eq!(result.error_kind(), Some(ErrorKind::InvalidInput));
        assert_eq!(result.message(), Some(messages::INVALID_DATE_RANGE));
        assert_eq!(store.write_count(), 0);
        assert_eq!(store.event_count(), 0);
    }

    #[tokio::test]
    async fn create_with_unknown_user_fails_before_storage() {
        let (store, lifecycle, _) = services();
        let inactive = store.register_user(false);

        for user in [Uuid::new_v4(), inactive] {
            let draft = draft_between(ts(2024, 1, 1), ts(2024, 1, 2));
            let result = lifecycle.create(draft, user, &CancellationSignal::new()).await;
            assert_eq!(result.error_kind(), Some(ErrorKind::NotFound));
            assert_eq!(result.message(), Some(messages::USER_NOT_FOUND));
        }
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn create_forces_acting_user_as_organizer() {
        let (store, lifecycle, _) = services();
        let u1 = store.register_user(true);
        let u2 = store.register_user(true);

        let mut draft = draft_between(ts(2024, 1, 1), ts(2024, 1, 2));
        draft.organizer_id = Some(u2);
        let result = lifecycle.create(draft, u1, &CancellationSignal::new()).await;

        assert!(result.is_success());
        assert_eq!(result.message(), Some(messages::CREATE_EVENT_SUCCESS));
        let stored = store.all_events();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].organizer_id, u1);
    }

    #[tokio::test]
    async fn create_allows_zero_length_event() {
        let (store, lifecycle, _) = services();
        let owner = store.register_user(true);

        let at = ts(2024, 5, 1);
        let result = lifecycle
            .create(draft_between(at, at), owner, &CancellationSignal::new())
            .await;
        assert!(result.is_success());
    }

    #[tokio::test]
    async fn create_rejects_malformed_draft() {
        let (store, lifecycle, _) = services();
        let owner = store.register_user(true);

        let mut draft = draft_between(ts(2024, 1, 1), ts(2024, 1, 2));
        draft.name = String::new();
        let result = lifecycle.create(draft, owner, &CancellationSignal::new()).await;

        assert_eq!(result.error_kind(), Some(ErrorKind::InvalidInput));
        assert!(result.message().unwrap().starts_with(messages::INVALID_EVENT_DATA));
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn create_reports_zero_affected_rows_as_failure() {
        let (store, lifecycle, _) = services();
        let owner = store.register_user(true);
        store.set_read_only(true);

        let result = lifecycle
            .create(draft_between(ts(2024, 1, 1), ts(2024, 1, 2)), owner, &CancellationSignal::new())
            .await;
        assert_eq!(result.error_kind(), Some(ErrorKind::PersistenceFailure));
        assert_eq!(result.message(), Some(messages::CREATE_EVENT_ERROR));
    }

    #[tokio::test]
    async fn cancelled_create_leaves_state_unchanged() {
        let (store, lifecycle, _) = services();
        let owner = store.register_user(true);
        let cancel = CancellationSignal::new();
        cancel.cancel();

        let result = lifecycle
            .create(draft_between(ts(2024, 1, 1), ts(2024, 1, 2)), owner, &cancel)
            .await;
        assert_eq!(result.error_kind(), Some(ErrorKind::Cancelled));
        assert_eq!(result.message(), Some(messages::OPERATION_CANCELLED));
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn delete_by_non_organizer_is_unauthorized() {
        let (store, lifecycle, _) = services();
        let u1 = store.register_user(true);
        let u2 = store.register_user(true);
        let event_id = store.seed_event(u1, ts(2024, 1, 1), ts(2024, 1, 2));
        let writes_before = store.write_count();

        let result = lifecycle.delete(event_id, u2, &CancellationSignal::new()).await;

        assert_eq!(result.error_kind(), Some(ErrorKind::Unauthorized));
        assert_eq!(result.message(), Some(messages::UNAUTHORIZED_ACCESS));
        assert_eq!(store.write_count(), writes_before);
        assert!(store.find(event_id).is_some());
    }

    #[tokio::test]
    async fn delete_missing_event_is_not_found() {
        let (store, lifecycle, _) = services();
        let u1 = store.register_user(true);

        let result = lifecycle
            .delete(Uuid::new_v4(), u1, &CancellationSignal::new())
            .await;
        assert_eq!(result.error_kind(), Some(ErrorKind::NotFound));
        assert_eq!(result.message(), Some(messages::EVENT_NOT_FOUND));
    }

    #[tokio::test]
    async fn organizer_can_delete() {
        let (store, lifecycle, _) = services();
        let u1 = store.register_user(true);
        let event_id = store.seed_event(u1, ts(2024, 1, 1), ts(2024, 1, 2));

        let result = lifecycle.delete(event_id, u1, &CancellationSignal::new()).await;
        assert!(result.is_success());
        assert_eq!(result.message(), Some(messages::DELETE_EVENT_SUCCESS));
        assert!(store.find(event_id).is_none());
    }

    #[tokio::test]
    async fn delete_reports_zero_affected_rows_as_failure() {
        let (store, lifecycle, _) = services();
        let u1 = store.register_user(true);
        let event_id = store.seed_event(u1, ts(2024, 1, 1), ts(2024, 1, 2));
        store.set_read_only(true);

        let result = lifecycle.delete(event_id, u1, &CancellationSignal::new()).await;
        assert_eq!(result.message(), Some(messages::DELETE_EVENT_ERROR));
        assert!(store.find(event_id).is_some());
    }

    #[tokio::test]
    async fn update_by_non_organizer_is_unauthorized() {
        let (store, lifecycle, _) = services();
        let u1 = store.register_user(true);
        let u2 = store.register_user(true);
        let event_id = store.seed_event(u1, ts(2024, 1, 1), ts(2024, 1, 2));
        let writes_before = store.write_count();

        let update = update_for(event_id, ts(2024, 2, 1), ts(2024, 2, 2));
        let result = lifecycle.update(update, u2, &CancellationSignal::new()).await;

        assert_eq!(result.error_kind(), Some(ErrorKind::Unauthorized));
        assert_eq!(store.write_count(), writes_before);
    }

    #[tokio::test]
    async fn update_with_inverted_range_never_persists() {
        let (store, lifecycle, _) = services();
        let u1 = store.register_user(true);
        let event_id = store.seed_event(u1, ts(2024, 1, 1), ts(2024, 1, 2));
        let before = store.find(event_id).unwrap();
        let writes_before = store.write_count();

        let mut update = update_for(event_id, ts(2024, 3, 5), ts(2024, 3, 1));
        update.name = "Completely new name".into();
        update.location = "Elsewhere".into();
        let result = lifecycle.update(update, u1, &CancellationSignal::new()).await;

        assert_eq!(result.message(), Some(messages::INVALID_DATE_RANGE));
        assert_eq!(store.write_count(), writes_before);
        assert_eq!(store.find(event_id).unwrap(), before);
    }

    #[tokio::test]
    async fn organizer_update_replaces_fields_but_not_owner() {
        let (store, lifecycle, _) = services();
        let u1 = store.register_user(true);
        let event_id = store.seed_event(u1, ts(2024, 1, 1), ts(2024, 1, 2));

        let mut update = update_for(event_id, ts(2024, 2, 1), ts(2024, 2, 3));
        update.name = "Offsite".into();
        let result = lifecycle.update(update, u1, &CancellationSignal::new()).await;

        assert!(result.is_success());
        assert_eq!(result.message(), Some(messages::UPDATE_EVENT_SUCCESS));
        let stored = store.find(event_id).unwrap();
        assert_eq!(stored.name, "Offsite");
        assert_eq!(stored.start_date, ts(2024, 2, 1));
        assert_eq!(stored.organizer_id, u1);
    }

    #[tokio::test]
    async fn update_reports_zero_affected_rows_as_failure() {
        let (store, lifecycle, _) = services();
        let u1 = store.register_user(true);
        let event_id = store.seed_event(u1, ts(2024, 1, 1), ts(2024, 1, 2));
        let before = store.find(event_id).unwrap();
        store.set_read_only(true);

        let update = update_for(event_id, ts(2024, 2, 1), ts(2024, 2, 3));
        let result = lifecycle.update(update, u1, &CancellationSignal::new()).await;

        assert_eq!(result.error_kind(), Some(ErrorKind::PersistenceFailure));
        assert_eq!(result.message(), Some(messages::UPDATE_EVENT_ERROR));
        assert_eq!(store.find(event_id).unwrap(), before);
    }

    #[tokio::test]
    async fn storage_errors_surface_as_persistence_failure() {
        let (users, services) = failing_services();
        let owner = users.register_user(true);
        let cancel = CancellationSignal::new();
        let expected = format!("Storage error: {}", STORAGE_FAILURE);

        let created = services
            .lifecycle
            .create(draft_between(ts(2024, 1, 1), ts(2024, 1, 2)), owner, &cancel)
            .await;
        assert_eq!(created.error_kind(), Some(ErrorKind::PersistenceFailure));
        assert_eq!(created.message(), Some(expected.as_str()));

        let deleted = services.lifecycle.delete(Uuid::new_v4(), owner, &cancel).await;
        assert_eq!(deleted.error_kind(), Some(ErrorKind::PersistenceFailure));
        assert_eq!(deleted.message(), Some(expected.as_str()));
    }

    #[tokio::test]
    async fn update_missing_event_is_not_found() {
        let (store, lifecycle, _) = services();
        let u1 = store.register_user(true);

        let update = update_for(Uuid::new_v4(), ts(2024, 2, 1), ts(2024, 2, 3));
        let result = lifecycle.update(update, u1, &CancellationSignal::new()).await;
        assert_eq!(result.message(), Some(messages::EVENT_NOT_FOUND));
    }
}
