//! # Rainfall Records Service
//!
//! HTTP service for recording yearly rainfall, with role-based access,
//! aggregate analytics and CSV export.
//!
//! ## Architecture
//!
//! - **domain**: Core entities, value types and repository traits
//! - **application**: Use cases (registration, login, rainfall CRUD, analytics, export)
//! - **infrastructure**: SeaORM persistence, password hashing, JWT, shutdown
//! - **interfaces**: REST API with Swagger documentation
//! - **config**: TOML configuration with environment overrides
//! - **server**: Runtime wiring and lifecycle

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
