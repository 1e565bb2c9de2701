//! Database entities module

pub mod rainfall_entry;
pub mod user;

pub use rainfall_entry::Entity as RainfallEntry;
pub use user::Entity as User;
