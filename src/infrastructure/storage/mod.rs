//! In-process storage implementation

mod memory;

pub use memory::InMemoryEventStore;
