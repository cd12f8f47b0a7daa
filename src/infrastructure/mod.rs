//! Infrastructure layer: I/O implementations, emitters and DI container
//!
//! This layer implements I/O boundary traits and wires up services.

pub mod di;
pub mod emit;
pub mod error;
pub mod traits;

pub use error::{InfraError, InfraResult};
