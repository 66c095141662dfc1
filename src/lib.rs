//! # Event Planner
//!
//! Event lifecycle and query core: organizers create, update and delete
//! events; callers list them by organizer, participant, date window or page.
//!
//! ## Architecture
//!
//! - **domain**: Event and participant entities, filters, repository traits
//! - **application**: Lifecycle and query services returning [`Outcome`]
//! - **infrastructure**: SeaORM (SQLite) and in-memory storage adapters
//! - **shared**: Outcome/error types, messages, cancellation, logging
//! - **config**: TOML configuration

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use application::{EventLifecycleService, EventQueryService, EventServices};
pub use domain::{CreateEventDto, Event, EventFilter, EventRepository, UpdateEventDto, UserValidity};
pub use infrastructure::{connect_and_migrate, init_database, DatabaseConfig, InMemoryEventStore};
pub use shared::{CancellationSignal, DataResult, ErrorKind, Outcome, ServiceResult};
