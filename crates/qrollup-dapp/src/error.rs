//! Error types for the dapp.

use std::error::Error as _;

use qrollup_hal::HalError;
use qrollup_ir::IrError;
use thiserror::Error;

use crate::codec::CodecError;
use crate::rollup::RollupError;

/// Result type for dapp operations.
pub type DappResult<T> = Result<T, DappError>;

/// Errors raised while processing an advance request.
#[derive(Debug, Error)]
pub enum DappError {
    /// Payload was not valid `0x` hex of UTF-8.
    #[error("Decode error: {0}")]
    Decode(#[from] CodecError),

    /// Payload was not a command object.
    #[error("Malformed command: {0}")]
    Json(#[from] serde_json::Error),

    /// Unknown gate tag, or a tag used with the wrong operands.
    #[error("Invalid gate: {0}")]
    InvalidGate(String),

    /// Qubit index outside the register.
    #[error("Index error: qubit {index} is outside 0..{num_qubits} for gate '{gate}'")]
    Index {
        /// Gate tag the index was given for.
        gate: String,
        /// Offending index.
        index: i64,
        /// Register size.
        num_qubits: u32,
    },

    /// Circuit execution failed.
    #[error("Backend error: {0}")]
    Backend(#[from] HalError),

    /// Posting a notice or report failed.
    #[error("Rollup error: {0}")]
    Rollup(#[from] RollupError),
}

impl DappError {
    /// Short category name used in logs and error reports.
    pub fn category(&self) -> &'static str {
        match self {
            DappError::Decode(_) | DappError::Json(_) => "DecodeError",
            DappError::InvalidGate(_) => "InvalidGateError",
            DappError::Index { .. } => "IndexError",
            DappError::Backend(_) => "BackendError",
            DappError::Rollup(_) => "RollupError",
        }
    }

    /// Render the error with its category and the chain of causes.
    ///
    /// A cause whose text already appears in the line above it is skipped.
    pub fn trace(&self) -> String {
        let mut last = self.to_string();
        let mut out = format!("{}: {}", self.category(), last);
        let mut source = self.source();
        while let Some(cause) = source {
            let text = cause.to_string();
            if !last.contains(&text) {
                out.push_str("\n  caused by: ");
                out.push_str(&text);
            }
            last = text;
            source = cause.source();
        }
        out
    }
}

impl From<IrError> for DappError {
    fn from(e: IrError) -> Self {
        match e {
            IrError::QubitNotFound {
                qubit,
                num_qubits,
                gate_name,
            } => DappError::Index {
                gate: gate_name.unwrap_or_default(),
                index: i64::from(qubit.0),
                num_qubits: u32::try_from(num_qubits).unwrap_or(u32::MAX),
            },
            other => DappError::InvalidGate(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrollup_ir::QubitId;

    #[test]
    fn test_categories() {
        assert_eq!(
            DappError::InvalidGate("QQ".into()).category(),
            "InvalidGateError"
        );
        assert_eq!(
            DappError::Decode(CodecError::MissingPrefix).category(),
            "DecodeError"
        );
        let index = DappError::Index {
            gate: "H".into(),
            index: 7,
            num_qubits: 5,
        };
        assert_eq!(index.category(), "IndexError");
    }

    #[test]
    fn test_trace_does_not_repeat_embedded_causes() {
        let err = DappError::Decode(CodecError::Hex(hex::FromHexError::OddLength));
        let trace = err.trace();
        assert_eq!(
            trace,
            "DecodeError: Decode error: invalid hex: Odd number of digits"
        );
        assert_eq!(trace.matches("invalid hex").count(), 1);
    }

    #[test]
    fn test_trace_of_status_error_is_one_line() {
        let err = DappError::Rollup(RollupError::Status {
            endpoint: "notice",
            code: 500,
            message: "down".into(),
        });
        assert_eq!(
            err.trace(),
            "RollupError: Rollup error: Coordinator returned 500 for notice: down"
        );
    }

    #[test]
    fn test_oversized_register_saturates() {
        let err: DappError = IrError::QubitNotFound {
            qubit: QubitId(3),
            num_qubits: usize::MAX,
            gate_name: None,
        }
        .into();
        assert!(matches!(
            err,
            DappError::Index {
                num_qubits: u32::MAX,
                ..
            }
        ));
    }

    #[test]
    fn test_ir_qubit_error_becomes_index_error() {
        let err: DappError = IrError::QubitNotFound {
            qubit: QubitId(9),
            num_qubits: 5,
            gate_name: Some("h".into()),
        }
        .into();
        assert!(matches!(
            err,
            DappError::Index {
                index: 9,
                num_qubits: 5,
                ..
            }
        ));
    }
}
