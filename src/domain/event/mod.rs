//! Event aggregate
//!
//! Contains the Event entity, its transfer shapes, the storage filter and
//! the repository interface.

pub mod dto;
pub mod filter;
pub mod model;
pub mod repository;

pub use dto::{apply_update, CreateEventDto, EventView, EventWithParticipantsView, UpdateEventDto};
pub use filter::{DateWindow, EventFilter};
pub use model::Event;
pub use repository::EventRepository;
