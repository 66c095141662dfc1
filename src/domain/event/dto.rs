//! Event transfer shapes and entity mapping

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::model::Event;
use crate::domain::participant::ParticipantView;

/// Draft for a new event.
///
/// `organizer_id` is accepted for wire compatibility but never trusted: the
/// lifecycle service always replaces it with the acting user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateEventDto {
    #[serde(default)]
    pub organizer_id: Option<Uuid>,
    #[validate(length(min = 1, max = 200, message = "event name must be 1 to 200 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 2000, message = "description must be at most 2000 characters"))]
    pub description: String,
    pub start_date: DateTime<FixedOffset>,
    pub end_date: DateTime<FixedOffset>,
    #[validate(length(max = 300, message = "location must be at most 300 characters"))]
    pub location: String,
    #[validate(length(min = 1, max = 64, message = "timezone must be 1 to 64 characters"))]
    pub timezone: String,
}

impl CreateEventDto {
    /// Build a new entity owned by `organizer_id`.
    pub fn into_event(self, organizer_id: Uuid) -> Event {
        let now = Utc::now();
        Event {
            id: Uuid::new_v4(),
            organizer_id,
            name: self.name,
            description: self.description,
            start_date: self.start_date,
            end_date: self.end_date,
            location: self.location,
            timezone: self.timezone,
            participants: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Full replacement of an event's editable fields
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateEventDto {
    pub id: Uuid,
    #[validate(length(min = 1, max = 200, message = "event name must be 1 to 200 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 2000, message = "description must be at most 2000 characters"))]
    pub description: String,
    pub start_date: DateTime<FixedOffset>,
    pub end_date: DateTime<FixedOffset>,
    #[validate(length(max = 300, message = "location must be at most 300 characters"))]
    pub location: String,
    #[validate(length(min = 1, max = 64, message = "timezone must be 1 to 64 characters"))]
    pub timezone: String,
}

/// Merge `update` into a copy of `event`.
///
/// The stored entity is left untouched so the caller can validate the
/// candidate before replacing anything. Identity, organizer, participants
/// and `created_at` are carried over.
pub fn apply_update(event: &Event, update: &UpdateEventDto) -> Event {
    Event {
        name: update.name.clone(),
        description: update.description.clone(),
        start_date: update.start_date,
        end_date: update.end_date,
        location: update.location.clone(),
        timezone: update.timezone.clone(),
        updated_at: Utc::now(),
        ..event.clone()
    }
}

/// Read model of a single event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventView {
    pub id: Uuid,
    pub organizer_id: Uuid,
    pub name: String,
    pub description: String,
    pub start_date: DateTime<FixedOffset>,
    pub end_date: DateTime<FixedOffset>,
    pub location: String,
    pub timezone: String,
}

impl From<&Event> for EventView {
    fn from(e: &Event) -> Self {
        Self {
            id: e.id,
            organizer_id: e.organizer_id,
            name: e.name.clone(),
            description: e.description.clone(),
            start_date: e.start_date,
            end_date: e.end_date,
            location: e.location.clone(),
            timezone: e.timezone.clone(),
        }
    }
}

impl From<Event> for EventView {
    fn from(e: Event) -> Self {
        Self {
            id: e.id,
            organizer_id: e.organizer_id,
            name: e.name,
            description: e.description,
            start_date: e.start_date,
            end_date: e.end_date,
            location: e.location,
            timezone: e.timezone,
        }
    }
}

/// Event together with its participant list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventWithParticipantsView {
    #[serde(flatten)]
    pub event: EventView,
    pub participants: Vec<ParticipantView>,
}

impl From<Event> for EventWithParticipantsView {
    fn from(mut e: Event) -> Self {
        let participants = std::mem::take(&mut e.participants)
            .into_iter()
            .map(ParticipantView::from)
            .collect();
        Self {
            event: EventView::from(e),
            participants,
        }
    }
}
