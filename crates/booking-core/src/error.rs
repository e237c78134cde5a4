use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Unknown department: {0}")]
    UnknownDepartment(String),
    #[error("Invalid form: {0}")]
    InvalidForm(String),
    #[error("Appointment not found: {0}")]
    AppointmentNotFound(u64),
    #[error("Submission failed: {0}")]
    Submission(String),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
