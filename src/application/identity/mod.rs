//! Identity module: registration & authentication
//!
//! Contains the `UserService` which orchestrates the credential store,
//! the password hasher and the token issuer.

pub mod service;

pub use service::{AuthResult, UserService};
