//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::Application(e) => match e {
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                ApplicationError::UnknownItem(_) => crate::exitcode::NOINPUT,
                ApplicationError::Domain(_) => crate::exitcode::DATAERR,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn given_rejected_drop_then_exit_code_is_dataerr() {
        let err = CliError::from(ApplicationError::from(DomainError::UnresolvedReference(
            "teapot".into(),
        )));
        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
    }

    #[test]
    fn given_config_error_then_exit_code_is_config() {
        let err = CliError::from(ApplicationError::Config {
            message: "parse".into(),
        });
        assert_eq!(err.exit_code(), crate::exitcode::CONFIG);
        assert_eq!(CliError::InvalidArgs("x".into()).exit_code(), crate::exitcode::USAGE);
    }
}
