//! SeaORM-backed collaborators for the event services

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::application::events::EventServices;
use crate::config::PaginationConfig;

use super::event_repository::SeaOrmEventRepository;
use super::user_repository::SeaOrmUserValidity;

/// Holds one connection pool and hands out shared repository handles.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let services = repos.event_services(config.pagination.clone());
/// let page = services.queries.get_all_with_pagination(1, 10, &cancel).await;
/// ```
pub struct SeaOrmRepositoryProvider {
    events: Arc<SeaOrmEventRepository>,
    users: Arc<SeaOrmUserValidity>,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            events: Arc::new(SeaOrmEventRepository::new(db.clone())),
            users: Arc::new(SeaOrmUserValidity::new(db)),
        }
    }

    pub fn events(&self) -> Arc<SeaOrmEventRepository> {
        self.events.clone()
    }

    pub fn users(&self) -> Arc<SeaOrmUserValidity> {
        self.users.clone()
    }

    pub fn event_services(
        &self,
        pagination: PaginationConfig,
    ) -> EventServices<SeaOrmEventRepository, SeaOrmUserValidity> {
        EventServices::new(self.events(), self.users(), pagination)
    }
}
