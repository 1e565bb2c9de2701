//! Rainfall aggregate
//!
//! Yearly rainfall entries, their aggregate summary and the repository interface.

pub mod model;
pub mod repository;
pub mod summary;

mod dto_create;
mod dto_update;

pub use model::RainfallEntry;
pub use summary::RainfallSummary;

pub use dto_create::CreateRainfallDto;
pub use dto_update::UpdateRainfallDto;

pub use repository::RainfallRepositoryInterface;
