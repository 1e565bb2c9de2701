//! Rainfall records: CRUD, analytics and CSV export

pub mod export;
pub mod service;

pub use export::to_csv;
pub use service::RainfallService;
