pub mod events;

pub use events::{EventLifecycleService, EventQueryService, EventServices};
