//! User collaborator
//!
//! The event core only asks whether a user id denotes a valid account.

pub mod repository;

pub use repository::UserValidity;
