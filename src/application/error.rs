//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Notice shown for an entry that is not six 0-3 digits.
pub const NOTICE_INVALID_INPUT: &str = "请输入6位数字（0-3）";

/// Notice shown for every request-side failure.
pub const NOTICE_REQUEST_FAILED: &str = "生成卦象失败，请重试";

/// Application errors wrap domain errors and add request-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("server returned HTTP {status}")]
    RequestFailed { status: u16 },

    #[error("network error: {message}")]
    NetworkError { message: String },

    #[error("cannot decode response: {message}")]
    Decode { message: String },

    #[error("a request is already in flight")]
    Busy,

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApplicationError {
    /// The blocking notice a user sees for this error.
    ///
    /// Detail stays in the logs; the notice is one of two fixed messages.
    pub fn user_notice(&self) -> &'static str {
        match self {
            ApplicationError::Domain(_) => NOTICE_INVALID_INPUT,
            _ => NOTICE_REQUEST_FAILED,
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ApplicationError::Domain(_))
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
