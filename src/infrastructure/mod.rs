//! Infrastructure layer - storage adapters

pub mod database;
pub mod storage;

pub use database::{
    connect_and_migrate, init_database, DatabaseConfig, SeaOrmEventRepository,
    SeaOrmRepositoryProvider, SeaOrmUserValidity,
};
pub use storage::InMemoryEventStore;
