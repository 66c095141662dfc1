//! SeaORM implementation of UserValidity

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult, UserValidity};
use crate::infrastructure::database::entities::user;
use crate::shared::CancellationSignal;

/// Answers user-validity questions from the `users` table.
///
/// A user is valid when the row exists and `is_active` is set.
pub struct SeaOrmUserValidity {
    db: DatabaseConnection,
}

impl SeaOrmUserValidity {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

#[async_trait]
impl UserValidity for SeaOrmUserValidity {
    async fn is_valid(&self, user_id: Uuid, cancel: &CancellationSignal) -> DomainResult<bool> {
        cancel.check()?;
        let model = user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        match model {
            Some(u) => Ok(u.is_active),
            None => {
                debug!(user_id = %user_id, "User not found in database");
                Ok(false)
            }
        }
    }
}
