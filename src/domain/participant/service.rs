//! Invitation capability exposed to the participant service

use async_trait::async_trait;
use uuid::Uuid;

use crate::shared::{CancellationSignal, ServiceResult};

/// Sends invitations for an event on behalf of its organizer.
///
/// Implemented outside this crate; the event services only define the
/// boundary.
#[async_trait]
pub trait InvitationSender: Send + Sync {
    async fn send_invitation(
        &self,
        organizer_id: Uuid,
        event_id: Uuid,
        user_ids: &[Uuid],
        cancel: &CancellationSignal,
    ) -> ServiceResult;
}
