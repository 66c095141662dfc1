pub mod errors;
pub mod outcome;
pub mod pagination;

pub use errors::*;
pub use outcome::*;
pub use pagination::*;
