//! Circuit state owned by the dispatcher.

use qrollup_ir::{Circuit, QubitId};

use crate::command::GateRecord;
use crate::error::{DappError, DappResult};

/// Name given to every working circuit.
const CIRCUIT_NAME: &str = "qrollup";

/// The open circuit plus its gate history.
///
/// The register has `num_qubits` qubits and as many classical bits. The
/// history lists every accepted command since the last `MeasAll`.
#[derive(Debug, Clone)]
pub struct CircuitState {
    num_qubits: u32,
    circuit: Circuit,
    history: Vec<GateRecord>,
}

impl CircuitState {
    /// Fresh zero-initialized state.
    pub fn new(num_qubits: u32) -> Self {
        Self {
            num_qubits,
            circuit: Circuit::with_size(CIRCUIT_NAME, num_qubits, num_qubits),
            history: vec![],
        }
    }

    /// Register size.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// The circuit built so far.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    pub(crate) fn circuit_mut(&mut self) -> &mut Circuit {
        &mut self.circuit
    }

    /// Gate history since the last reset.
    pub fn history(&self) -> &[GateRecord] {
        &self.history
    }

    pub(crate) fn record(&mut self, record: GateRecord) {
        self.history.push(record);
    }

    /// Qubit reserved for teleportation: the last one.
    pub fn scratch_qubit(&self) -> QubitId {
        QubitId(self.num_qubits.saturating_sub(1))
    }

    /// Check a raw index against the register.
    pub fn qubit(&self, gate: &str, index: i64) -> DappResult<QubitId> {
        u32::try_from(index)
            .ok()
            .filter(|&i| i < self.num_qubits)
            .map(QubitId)
            .ok_or_else(|| DappError::Index {
                gate: gate.to_string(),
                index,
                num_qubits: self.num_qubits,
            })
    }

    /// Start over with a fresh register of the same size.
    pub fn reset(&mut self) {
        *self = Self::new(self.num_qubits);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_empty() {
        let state = CircuitState::new(5);
        assert_eq!(state.circuit().num_qubits(), 5);
        assert_eq!(state.circuit().num_clbits(), 5);
        assert!(state.circuit().is_empty());
        assert!(state.history().is_empty());
        assert_eq!(state.scratch_qubit(), QubitId(4));
    }

    #[test]
    fn test_qubit_bounds() {
        let state = CircuitState::new(3);
        assert_eq!(state.qubit("H", 2).unwrap(), QubitId(2));
        assert!(matches!(
            state.qubit("H", 3),
            Err(DappError::Index { index: 3, .. })
        ));
        assert!(matches!(
            state.qubit("H", -1),
            Err(DappError::Index { index: -1, .. })
        ));
        assert!(state.qubit("H", i64::MAX).is_err());
    }

    #[test]
    fn test_reset() {
        let mut state = CircuitState::new(2);
        state.circuit_mut().h(QubitId(0)).unwrap();
        state.record(GateRecord {
            gate: "H".into(),
            target: Some(0),
            control: None,
        });

        state.reset();
        assert!(state.circuit().is_empty());
        assert!(state.history().is_empty());
        assert_eq!(state.num_qubits(), 2);
    }
}
