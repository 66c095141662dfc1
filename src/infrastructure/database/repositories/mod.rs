//! Database repository implementations
//!
//! SeaORM repositories + a provider that wires them into the event services.

pub mod event_repository;
pub mod repository_provider;
pub mod user_repository;

pub use event_repository::SeaOrmEventRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use user_repository::SeaOrmUserValidity;
