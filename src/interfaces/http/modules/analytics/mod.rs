//! Analytics module: totals, average and extremes

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
