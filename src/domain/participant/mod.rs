//! Participant relation and the invitation boundary

pub mod model;
pub mod service;

pub use model::{Participant, ParticipantView};
pub use service::InvitationSender;
