//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod error;
pub mod error_ext;
pub mod services;
pub mod wire;

pub use error::{
    ApplicationError, ApplicationResult, NOTICE_INVALID_INPUT, NOTICE_REQUEST_FAILED,
};
pub use error_ext::ResultExt;
