//! Backend capabilities.

use serde::{Deserialize, Serialize};

/// What a backend can execute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// Number of qubits available.
    pub num_qubits: u32,
    /// Supported gate set (OpenQASM 3 naming convention).
    pub gate_set: GateSet,
    /// Maximum number of shots per job.
    pub max_shots: u32,
    /// Whether this is a simulator (`true`) vs real hardware (`false`).
    pub is_simulator: bool,
    /// Additional capability flags, e.g. `"statevector"`,
    /// `"mid_circuit_measurement"`, `"dynamic_circuits"`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl Capabilities {
    /// Create capabilities for a simulator.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            name: "simulator".into(),
            num_qubits,
            gate_set: GateSet::standard(),
            max_shots: 100_000,
            is_simulator: true,
            features: vec![
                "statevector".into(),
                "mid_circuit_measurement".into(),
                "dynamic_circuits".into(),
            ],
        }
    }

    /// Check whether a named capability flag is present.
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}

/// Gates a backend accepts, by IR name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateSet {
    /// Single-qubit gates supported.
    pub single_qubit: Vec<String>,
    /// Two-qubit gates supported.
    pub two_qubit: Vec<String>,
}

impl GateSet {
    /// Every gate in `qrollup_ir::StandardGate`.
    pub fn standard() -> Self {
        Self {
            single_qubit: ["id", "x", "y", "z", "h", "s", "sdg", "t", "tdg"]
                .into_iter()
                .map(String::from)
                .collect(),
            two_qubit: ["cx", "cy", "cz", "swap"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    /// Check if a gate is supported.
    pub fn contains(&self, gate: &str) -> bool {
        self.single_qubit.iter().any(|g| g == gate) || self.two_qubit.iter().any(|g| g == gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulator_capabilities() {
        let caps = Capabilities::simulator(5);
        assert!(caps.is_simulator);
        assert_eq!(caps.num_qubits, 5);
        assert!(caps.has_feature("mid_circuit_measurement"));
        assert!(!caps.has_feature("photonic"));
    }

    #[test]
    fn test_standard_gate_set() {
        let gates = GateSet::standard();
        assert!(gates.contains("h"));
        assert!(gates.contains("swap"));
        assert!(!gates.contains("ccx"));
    }
}
