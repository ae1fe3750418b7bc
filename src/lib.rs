pub mod config;
pub mod database;
pub mod entities;
pub mod error;
pub mod registration;
pub mod router;
pub mod routes;
pub mod source;

pub use error::RegistryError;
pub use source::{EventPage, EventSource};
