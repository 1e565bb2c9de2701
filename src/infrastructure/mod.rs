//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;
pub mod server;

pub use database::{init_database, run_migrations, DatabaseConfig};
pub use server::{listen_for_shutdown_signals, ShutdownSignal};
