//! Quantum gate types.

use serde::{Deserialize, Serialize};

use crate::qubit::ClbitId;

/// Standard gates with known semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford+T gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Y gate.
    CY,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    Swap,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::CX => "cx",
            StandardGate::CY => "cy",
            StandardGate::CZ => "cz",
            StandardGate::Swap => "swap",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::I
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::Sdg
            | StandardGate::T
            | StandardGate::Tdg => 1,

            StandardGate::CX | StandardGate::CY | StandardGate::CZ | StandardGate::Swap => 2,
        }
    }
}

/// Classical condition for conditional gates.
///
/// The gate only executes when `clbit` currently holds `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassicalCondition {
    /// The classical bit that is tested.
    pub clbit: ClbitId,
    /// The value the bit must hold.
    pub value: bool,
}

impl ClassicalCondition {
    /// Create a new classical condition.
    pub fn new(clbit: ClbitId, value: bool) -> Self {
        Self { clbit, value }
    }

    /// Condition satisfied when `clbit` reads 1.
    pub fn is_set(clbit: ClbitId) -> Self {
        Self::new(clbit, true)
    }

    /// Evaluate the condition against a classical register.
    ///
    /// Bits beyond the end of the register read as 0.
    pub fn holds(&self, register: &[bool]) -> bool {
        register.get(self.clbit.index()).copied().unwrap_or(false) == self.value
    }
}

/// A gate with an optional classical condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate {
    /// The kind of gate.
    pub kind: StandardGate,
    /// Optional classical condition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<ClassicalCondition>,
}

impl Gate {
    /// Create an unconditional gate.
    pub fn standard(gate: StandardGate) -> Self {
        Self {
            kind: gate,
            condition: None,
        }
    }

    /// Add a classical condition to the gate.
    #[must_use]
    pub fn with_condition(mut self, condition: ClassicalCondition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Get the name of this gate.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.kind.num_qubits()
    }

    /// Whether this gate is gated on a classical bit.
    pub fn is_conditional(&self) -> bool {
        self.condition.is_some()
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::standard(gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::Tdg.num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);
        assert_eq!(StandardGate::Swap.num_qubits(), 2);
        assert_eq!(StandardGate::I.name(), "id");
    }

    #[test]
    fn test_gate_creation() {
        let h = Gate::standard(StandardGate::H);
        assert_eq!(h.name(), "h");
        assert_eq!(h.num_qubits(), 1);
        assert!(!h.is_conditional());

        let x = Gate::from(StandardGate::X).with_condition(ClassicalCondition::is_set(ClbitId(2)));
        assert!(x.is_conditional());
    }

    #[test]
    fn test_condition_holds() {
        let cond = ClassicalCondition::is_set(ClbitId(1));
        assert!(cond.holds(&[false, true]));
        assert!(!cond.holds(&[true, false]));
        assert!(!cond.holds(&[true]));

        let cleared = ClassicalCondition::new(ClbitId(0), false);
        assert!(cleared.holds(&[false]));
    }
}
