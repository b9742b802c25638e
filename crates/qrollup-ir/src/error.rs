//! Error types for the IR crate.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Errors that can occur while building a circuit.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit not found in circuit.
    #[error("Qubit {qubit} not found in circuit of {num_qubits} qubits{}", format_gate_context(.gate_name))]
    QubitNotFound {
        /// The qubit that was not found.
        qubit: QubitId,
        /// Size of the quantum register.
        num_qubits: usize,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Classical bit not found in circuit.
    #[error("Classical bit {clbit} not found in circuit of {num_clbits} bits{}", format_gate_context(.gate_name))]
    ClbitNotFound {
        /// The classical bit that was not found.
        clbit: ClbitId,
        /// Size of the classical register.
        num_clbits: usize,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Gate requires different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Measurement operands do not pair up.
    #[error("Measurement of {qubits} qubits into {clbits} classical bits")]
    MeasureArity {
        /// Number of qubits measured.
        qubits: usize,
        /// Number of classical bits written.
        clbits: usize,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },
}

#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_not_found_display() {
        let err = IrError::QubitNotFound {
            qubit: QubitId(7),
            num_qubits: 5,
            gate_name: Some("h".into()),
        };
        let msg = err.to_string();
        assert!(msg.contains("q7"));
        assert!(msg.contains("5 qubits"));
        assert!(msg.contains("(gate: h)"));
    }

    #[test]
    fn test_clbit_not_found_without_context() {
        let err = IrError::ClbitNotFound {
            clbit: ClbitId(3),
            num_clbits: 2,
            gate_name: None,
        };
        assert_eq!(
            err.to_string(),
            "Classical bit c3 not found in circuit of 2 bits"
        );
    }
}
