//! HAL errors.

use thiserror::Error;

/// Errors raised while validating, running or collecting a job.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// The backend refused the circuit.
    #[error("Invalid circuit: {0}")]
    InvalidCircuit(String),

    /// Register wider than the backend.
    #[error("Circuit needs {qubits} qubits, backend has {max}")]
    CircuitTooLarge { qubits: usize, max: u32 },

    /// Shot count outside `1..=max`.
    #[error("Shot count {shots} is outside 1..={max}")]
    InvalidShots { shots: u32, max: u32 },

    /// No job with this id, or its result was already taken.
    #[error("Job not found: {0}")]
    JobNotFound(String),

    /// The job ended in `Failed`.
    #[error("Job failed: {0}")]
    JobFailed(String),

    /// The job ended in `Cancelled`.
    #[error("Job {0} was cancelled")]
    JobCancelled(String),

    /// `wait` gave up.
    #[error("Job {job} still pending after {polls} polls")]
    Timeout { job: String, polls: u32 },
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
