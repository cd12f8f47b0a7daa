//! Context helpers for errors crossing into the application layer

use std::fmt::Display;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Attach a short description of the failed step to any error.
pub trait ResultExt<T> {
    fn context(self, what: impl Display) -> ApplicationResult<T>;

    /// Same as [`ResultExt::context`], naming the file involved.
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>
    where
        Self: Sized,
    {
        self.context(format_args!("{}: {}", action, path.display()))
    }
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, what: impl Display) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: what.to_string(),
            source: Box::new(e),
        })
    }
}
