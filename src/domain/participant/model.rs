use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Membership of a user in an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub joined_at: DateTime<Utc>,
}

impl Participant {
    pub fn new(event_id: Uuid, user_id: Uuid) -> Self {
        Self {
            event_id,
            user_id,
            joined_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantView {
    pub user_id: Uuid,
    pub joined_at: DateTime<Utc>,
}

impl From<Participant> for ParticipantView {
    fn from(p: Participant) -> Self {
        Self {
            user_id: p.user_id,
            joined_at: p.joined_at,
        }
    }
}
