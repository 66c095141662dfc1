//! Domain layer: entities, transfer shapes and collaborator contracts

pub mod event;
pub mod participant;
pub mod user;

pub use event::{
    apply_update, CreateEventDto, DateWindow, Event, EventFilter, EventRepository, EventView,
    EventWithParticipantsView, UpdateEventDto,
};
pub use participant::{InvitationSender, Participant, ParticipantView};
pub use user::UserValidity;

pub use crate::shared::types::errors::{DomainError, DomainResult};
