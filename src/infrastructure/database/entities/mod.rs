//! Database entities module

pub mod event;
pub mod participant;
pub mod user;

pub use event::Entity as Event;
pub use participant::Entity as Participant;
pub use user::Entity as User;
