use std::result::Result as StdResult;

use booking_config::ConfigError;
use booking_core::CoreError;
use thiserror::Error;

/// Unified error type for the form, storage and configuration layers.
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Unknown department: {0}")]
    UnknownDepartment(String),
    #[error("Appointment not found: {0}")]
    AppointmentNotFound(u64),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = StdResult<T, BookingError>;

/// Failures that end the shell.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] BookingError),
    #[error("Terminal error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid input: {0}")]
    Input(String),
}

impl From<CoreError> for BookingError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownDepartment(slug) => BookingError::UnknownDepartment(slug),
            CoreError::AppointmentNotFound(id) => BookingError::AppointmentNotFound(id),
            CoreError::InvalidForm(message) | CoreError::InvalidOperation(message) => {
                BookingError::InvalidInput(message)
            }
            CoreError::Submission(message)
            | CoreError::Storage(message)
            | CoreError::Serde(message) => BookingError::StorageError(message),
            CoreError::Io(err) => BookingError::StorageError(err.to_string()),
        }
    }
}

impl From<ConfigError> for BookingError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::UnknownKey(_) | ConfigError::InvalidValue { .. } => {
                BookingError::InvalidInput(err.to_string())
            }
            other => BookingError::ConfigError(other.to_string()),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        CliError::Core(err.into())
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Core(err.into())
    }
}
