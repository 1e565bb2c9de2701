//! Rainfall data module: CRUD over yearly entries

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
