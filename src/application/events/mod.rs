//! Event use-cases
//!
//! `EventLifecycleService` owns every write; `EventQueryService` serves the
//! read models. Both consult the user collaborator and the event repository
//! and report through [`Outcome`](crate::shared::Outcome).

pub mod lifecycle;
pub mod queries;

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use crate::config::PaginationConfig;
use crate::domain::{EventRepository, UserValidity};
use crate::shared::messages;
use crate::shared::{CancellationSignal, Rejection};

pub use lifecycle::EventLifecycleService;
pub use queries::EventQueryService;

/// Both event services wired to the same collaborators.
pub struct EventServices<R: EventRepository + ?Sized, U: UserValidity + ?Sized> {
    pub lifecycle: EventLifecycleService<R, U>,
    pub queries: EventQueryService<R, U>,
}

impl<R: EventRepository + ?Sized, U: UserValidity + ?Sized> EventServices<R, U> {
    pub fn new(events: Arc<R>, users: Arc<U>, pagination: PaginationConfig) -> Self {
        Self {
            lifecycle: EventLifecycleService::new(events.clone(), users.clone()),
            queries: EventQueryService::new(events, users, pagination),
        }
    }
}

/// Reject with `NotFound` unless `user_id` is a valid account.
async fn ensure_user_valid<U: UserValidity + ?Sized>(
    users: &U,
    user_id: Uuid,
    cancel: &CancellationSignal,
) -> Result<(), Rejection> {
    cancel.check()?;
    if users.is_valid(user_id, cancel).await? {
        Ok(())
    } else {
        warn!(user_id = %user_id, "Unknown or inactive user");
        Err(Rejection::not_found(messages::USER_NOT_FOUND))
    }
}

fn validation_rejection(errors: validator::ValidationErrors) -> Rejection {
    Rejection::invalid_input(format!("{}: {}", messages::INVALID_EVENT_DATA, errors))
}
