//! Storage-agnostic event filter
//!
//! Every populated criterion must match (logical AND). An empty filter
//! matches all events.

use chrono::{DateTime, FixedOffset};
use uuid::Uuid;

use super::model::Event;

/// Inclusive time window used for overlap queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub organizer_id: Option<Uuid>,
    pub participant_user_id: Option<Uuid>,
    pub date_overlap: Option<DateWindow>,
}

impl EventFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn organized_by(user_id: Uuid) -> Self {
        Self {
            organizer_id: Some(user_id),
            ..Self::default()
        }
    }

    pub fn participated_by(user_id: Uuid) -> Self {
        Self {
            participant_user_id: Some(user_id),
            ..Self::default()
        }
    }

    pub fn overlapping(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        Self {
            date_overlap: Some(DateWindow { start, end }),
            ..Self::default()
        }
    }

    pub fn with_organizer(mut self, user_id: Uuid) -> Self {
        self.organizer_id = Some(user_id);
        self
    }

    pub fn with_participant(mut self, user_id: Uuid) -> Self {
        self.participant_user_id = Some(user_id);
        self
    }

    pub fn with_overlap(mut self, start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        self.date_overlap = Some(DateWindow { start, end });
        self
    }

    /// In-memory evaluation. Participant matching needs `event.participants`
    /// to be loaded.
    pub fn matches(&self, event: &Event) -> bool {
        if let Some(organizer_id) = self.organizer_id {
            if !event.is_organized_by(organizer_id) {
                return false;
            }
        }

        if let Some(user_id) = self.participant_user_id {
            if !event.has_participant(user_id) {
                return false;
            }
        }

        if let Some(window) = &self.date_overlap {
            if !event.overlaps(&window.start, &window.end) {
                return false;
            }
        }

        true
    }
}
