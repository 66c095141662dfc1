use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::DomainResult;
use crate::shared::CancellationSignal;

#[async_trait]
pub trait UserValidity: Send + Sync {
    /// `true` when `user_id` exists and the account is active.
    async fn is_valid(&self, user_id: Uuid, cancel: &CancellationSignal) -> DomainResult<bool>;
}
