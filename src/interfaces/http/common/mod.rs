//! Shared HTTP building blocks: error responses and the validating extractor

pub mod error;
pub mod validated_json;

pub use error::{ApiError, MessageResponse};
pub use validated_json::ValidatedJson;
