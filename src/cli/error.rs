//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::exitcode;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    /// Already shown to the user as a notice; only the exit code remains.
    #[error("{0}")]
    Reported(ApplicationError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

fn application_exit_code(e: &ApplicationError) -> i32 {
    match e {
        ApplicationError::Domain(_) => exitcode::USAGE,
        ApplicationError::RequestFailed { .. } => exitcode::PROTOCOL,
        ApplicationError::NetworkError { .. } => exitcode::UNAVAILABLE,
        ApplicationError::Decode { .. } => exitcode::DATAERR,
        ApplicationError::Busy => exitcode::SOFTWARE,
        ApplicationError::Config { .. } => exitcode::CONFIG,
        ApplicationError::OperationFailed { .. } => exitcode::NOINPUT,
    }
}

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => exitcode::USAGE,
            CliError::Reported(e) => application_exit_code(e),
            CliError::Infra(e) => match e {
                InfraError::Application(e) => application_exit_code(e),
                InfraError::Io { .. } => exitcode::IOERR,
                InfraError::Client { .. } => exitcode::CONFIG,
                InfraError::Emit { .. } => exitcode::SOFTWARE,
            },
        }
    }

    /// Whether main still has to print this error.
    pub fn needs_report(&self) -> bool {
        !matches!(self, CliError::Reported(_))
    }
}
