//! Infrastructure layer: collaborator implementations and DI container
//!
//! This layer implements I/O boundary traits and wires up services.

pub mod di;
pub mod discord;
pub mod error;
pub mod traits;

pub use error::InfraError;
