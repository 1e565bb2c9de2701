//! Application layer - use cases behind the HTTP handlers

pub mod identity;
pub mod rainfall;

pub use identity::{AuthResult, UserService};
pub use rainfall::RainfallService;
