//! Event domain entity

use chrono::{DateTime, FixedOffset, Utc};
use uuid::Uuid;

use crate::domain::participant::Participant;

/// A scheduled event owned by its organizer.
///
/// `start_date <= end_date` holds for every event that reached storage
/// through the lifecycle service.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: Uuid,
    /// Set at creation, never changed afterwards
    pub organizer_id: Uuid,
    pub name: String,
    pub description: String,
    pub start_date: DateTime<FixedOffset>,
    pub end_date: DateTime<FixedOffset>,
    pub location: String,
    /// IANA-style label shown to users, e.g. "Europe/Istanbul"
    pub timezone: String,
    /// Only populated by storage calls that load participants
    pub participants: Vec<Participant>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Ownership rule: only the organizer may mutate or delete an event.
    pub fn is_organized_by(&self, user_id: Uuid) -> bool {
        self.organizer_id == user_id
    }

    pub fn has_participant(&self, user_id: Uuid) -> bool {
        self.participants.iter().any(|p| p.user_id == user_id)
    }

    /// Interval overlap with `[start, end]`, inclusive on both ends.
    pub fn overlaps(&self, start: &DateTime<FixedOffset>, end: &DateTime<FixedOffset>) -> bool {
        self.start_date <= *end && self.end_date >= *start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 1, day, hour, 0, 0)
            .unwrap()
    }

    fn sample_event(organizer_id: Uuid) -> Event {
        Event {
            id: Uuid::new_v4(),
            organizer_id,
            name: "Standup".into(),
            description: String::new(),
            start_date: at(10, 9),
            end_date: at(10, 10),
            location: "Room 1".into(),
            timezone: "UTC".into(),
            participants: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn organizer_check_is_exact_match() {
        let owner = Uuid::new_v4();
        let event = sample_event(owner);
        assert!(event.is_organized_by(owner));
        assert!(!event.is_organized_by(Uuid::new_v4()));
    }

    #[test]
    fn overlap_includes_touching_boundaries() {
        let event = sample_event(Uuid::new_v4());
        assert!(event.overlaps(&at(10, 10), &at(10, 12)));
        assert!(event.overlaps(&at(10, 0), &at(10, 9)));
        assert!(event.overlaps(&at(9, 0), &at(11, 0)));
        assert!(!event.overlaps(&at(10, 11), &at(10, 12)));
        assert!(!event.overlaps(&at(9, 0), &at(10, 8)));
    }

    #[test]
    fn participant_membership() {
        let mut event = sample_event(Uuid::new_v4());
        let guest = Uuid::new_v4();
        assert!(!event.has_participant(guest));
        event.participants.push(Participant::new(event.id, guest));
        assert!(event.has_participant(guest));
    }
}
