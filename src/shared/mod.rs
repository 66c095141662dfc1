pub mod cancellation;
pub mod logging;
pub mod messages;
pub mod types;
pub mod validations;

pub use cancellation::*;
pub use types::*;
pub use validations::*;
