//! Gate dispatcher.
//!
//! Every command is lowered to a list of instructions, all of which are
//! validated against the register before the first one is appended. A
//! failing command therefore leaves the circuit and history untouched.
//!
//! Teleportation of `from` onto `to` through the scratch qubit `s`:
//!
//! ```text
//! from ──────────────●──H──M(c_from)─────────────────
//!                    │        ║
//! s    ──|0⟩──H──●───X─────M(c_s)───║─────────────────
//!                │              ║   ║
//! to   ──|0⟩─────X──────────────X^c_s──Z^c_from──────
//! ```

use qrollup_hal::{Backend, HalError, ValidationResult};
use qrollup_ir::{ClassicalCondition, ClbitId, Instruction, QubitId, StandardGate};
use tracing::{debug, info, instrument};

use crate::command::{Command, GateOp, GateRecord};
use crate::error::{DappError, DappResult};
use crate::report::{Distribution, history_payload, measurement_payload};
use crate::state::CircuitState;

/// Shots used for `MeasAll`.
pub const DEFAULT_SHOTS: u32 = 1024;

/// Result of an accepted command.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Circuit is still open; carries the history so far.
    History(Vec<GateRecord>),
    /// Register was measured and reset.
    Measured(Distribution),
}

impl Outcome {
    /// Hex payload for the notice reporting this outcome.
    pub fn notice_payload(&self) -> DappResult<String> {
        match self {
            Outcome::History(history) => history_payload(history),
            Outcome::Measured(distribution) => measurement_payload(distribution),
        }
    }
}

/// Applies gate commands to a [`CircuitState`] and measures it on a backend.
pub struct Dispatcher<B> {
    state: CircuitState,
    backend: B,
    shots: u32,
}

impl<B: Backend> Dispatcher<B> {
    /// Dispatcher over a fresh register of `num_qubits`.
    pub fn new(backend: B, num_qubits: u32) -> Self {
        Self {
            state: CircuitState::new(num_qubits),
            backend,
            shots: DEFAULT_SHOTS,
        }
    }

    /// Override the shot count used by `MeasAll`.
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = shots;
        self
    }

    /// Current state.
    pub fn state(&self) -> &CircuitState {
        &self.state
    }

    /// The execution backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Shots per measurement.
    pub fn shots(&self) -> u32 {
        self.shots
    }

    /// Parse and apply a raw command.
    pub async fn dispatch(&mut self, command: Command) -> DappResult<Outcome> {
        let op = GateOp::try_from(command)?;
        self.apply(op).await
    }

    /// Apply an operation.
    #[instrument(skip(self), fields(gate = op.tag()))]
    pub async fn apply(&mut self, op: GateOp) -> DappResult<Outcome> {
        if op == GateOp::MeasureAll {
            return self.measure_all().await.map(Outcome::Measured);
        }

        let instructions = self.lower(&op)?;
        for inst in &instructions {
            self.state.circuit().validate(inst)?;
        }
        debug!("Appending {} instructions", instructions.len());

        let circuit = self.state.circuit_mut();
        for inst in instructions {
            circuit.apply(inst)?;
        }
        self.state.record(op.record());

        Ok(Outcome::History(self.state.history().to_vec()))
    }

    fn lower(&self, op: &GateOp) -> DappResult<Vec<Instruction>> {
        let tag = op.tag();
        let qubits = op
            .indices()
            .into_iter()
            .map(|i| self.state.qubit(tag, i))
            .collect::<DappResult<Vec<_>>>()?;

        Ok(match *op {
            GateOp::Single { gate, .. } => {
                vec![Instruction::single_qubit_gate(gate.standard(), qubits[0])]
            }
            GateOp::Two { gate, .. } => {
                if qubits[0] == qubits[1] {
                    return Err(DappError::InvalidGate(format!(
                        "'{tag}' needs two distinct qubits, got {} twice",
                        qubits[0]
                    )));
                }
                vec![Instruction::two_qubit_gate(
                    gate.standard(),
                    qubits[0],
                    qubits[1],
                )]
            }
            GateOp::Teleport { .. } => self.teleport(qubits[0], qubits[1])?,
            GateOp::Measure { .. } => vec![Instruction::measure(qubits[0], qubits[0].into())],
            GateOp::MeasureAll => vec![],
        })
    }

    fn teleport(&self, from: QubitId, to: QubitId) -> DappResult<Vec<Instruction>> {
        let scratch = self.state.scratch_qubit();
        if self.state.num_qubits() < 3 {
            return Err(DappError::InvalidGate(format!(
                "'TEL' needs at least 3 qubits, register has {}",
                self.state.num_qubits()
            )));
        }
        if from == to || from == scratch || to == scratch {
            return Err(DappError::InvalidGate(format!(
                "'TEL' needs distinct qubits outside the scratch qubit {scratch}, got {from} and {to}"
            )));
        }

        let c_from = ClbitId::from(from);
        let c_scratch = ClbitId::from(scratch);
        Ok(vec![
            Instruction::reset(to),
            Instruction::reset(scratch),
            Instruction::single_qubit_gate(StandardGate::H, scratch),
            Instruction::two_qubit_gate(StandardGate::CX, scratch, to),
            Instruction::two_qubit_gate(StandardGate::CX, from, scratch),
            Instruction::single_qubit_gate(StandardGate::H, from),
            Instruction::measure(from, c_from),
            Instruction::measure(scratch, c_scratch),
            Instruction::conditional_gate(
                StandardGate::X,
                [to],
                ClassicalCondition::is_set(c_scratch),
            ),
            Instruction::conditional_gate(
                StandardGate::Z,
                [to],
                ClassicalCondition::is_set(c_from),
            ),
        ])
    }

    async fn measure_all(&mut self) -> DappResult<Distribution> {
        let mut circuit = self.state.circuit().clone();
        circuit.barrier_all()?.measure_all()?;

        if let ValidationResult::Invalid { reasons } = self.backend.validate(&circuit).await? {
            return Err(HalError::InvalidCircuit(reasons.join("; ")).into());
        }
        let job_id = self.backend.submit(&circuit, self.shots).await?;
        let result = self.backend.wait(&job_id).await?;
        let distribution = Distribution::from_counts(&result.counts, result.shots);

        info!(
            "Measured circuit of depth {} over {} shots: {} outcomes",
            circuit.depth(),
            result.shots,
            distribution.len()
        );
        self.state.reset();
        Ok(distribution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::SingleQubitGate;
    use qrollup_adapter_sim::SimulatorBackend;

    fn dispatcher(num_qubits: u32) -> Dispatcher<SimulatorBackend> {
        Dispatcher::new(SimulatorBackend::with_seed(7), num_qubits)
    }

    #[tokio::test]
    async fn test_single_gate_appends_one_record() {
        let mut d = dispatcher(5);
        let outcome = d.dispatch(Command::new("H", 0)).await.unwrap();

        let Outcome::History(history) = outcome else {
            panic!("expected history");
        };
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].gate, "H");
        assert_eq!(d.state().circuit().len(), 1);
    }

    #[tokio::test]
    async fn test_index_error_leaves_state_untouched() {
        let mut d = dispatcher(3);
        d.dispatch(Command::new("X", 0)).await.unwrap();

        let err = d
            .dispatch(Command::with_control("CX", 0, 3))
            .await
            .unwrap_err();
        assert!(matches!(err, DappError::Index { index: 3, .. }));
        assert_eq!(d.state().circuit().len(), 1);
        assert_eq!(d.state().history().len(), 1);
    }

    #[tokio::test]
    async fn test_same_qubit_twice_is_invalid() {
        let mut d = dispatcher(3);
        let err = d
            .dispatch(Command::with_control("CZ", 1, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, DappError::InvalidGate(_)));
    }

    #[tokio::test]
    async fn test_measure_keeps_circuit_open() {
        let mut d = dispatcher(2);
        d.apply(GateOp::Single {
            gate: SingleQubitGate::X,
            target: 1,
        })
        .await
        .unwrap();
        let outcome = d.apply(GateOp::Measure { target: 1 }).await.unwrap();

        assert!(matches!(outcome, Outcome::History(h) if h.len() == 2));
        assert!(d.state().circuit().instructions()[1].is_measure());
    }

    #[tokio::test]
    async fn test_teleport_lowering() {
        let mut d = dispatcher(4);
        d.dispatch(Command::with_control("TEL", 0, 1))
            .await
            .unwrap();

        let circuit = d.state().circuit();
        assert_eq!(circuit.len(), 10);
        assert!(circuit.has_dynamic_ops());
        assert_eq!(d.state().history().len(), 1);
        assert_eq!(d.state().history()[0].gate, "TEL");
    }

    #[tokio::test]
    async fn test_teleport_rejects_scratch_and_small_registers() {
        let mut d = dispatcher(3);
        let err = d
            .dispatch(Command::with_control("TEL", 0, 2))
            .await
            .unwrap_err();
        assert!(matches!(err, DappError::InvalidGate(_)));

        let mut d = dispatcher(2);
        let err = d
            .dispatch(Command::with_control("TEL", 0, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, DappError::InvalidGate(_)));
        assert!(d.state().circuit().is_empty());
    }

    #[tokio::test]
    async fn test_measure_all_resets() {
        let mut d = dispatcher(2).with_shots(256);
        d.dispatch(Command::new("X", 0)).await.unwrap();

        let outcome = d.dispatch(Command::measure_all()).await.unwrap();
        let Outcome::Measured(dist) = outcome else {
            panic!("expected distribution");
        };
        assert_eq!(dist.get("10"), 1.0);
        assert!(d.state().circuit().is_empty());
        assert!(d.state().history().is_empty());
    }

    #[tokio::test]
    async fn test_backend_failure_keeps_state() {
        let backend = SimulatorBackend::with_seed(1);
        let mut d = Dispatcher::new(backend, 2).with_shots(0);
        d.dispatch(Command::new("H", 0)).await.unwrap();

        let err = d.dispatch(Command::measure_all()).await.unwrap_err();
        assert!(matches!(err, DappError::Backend(_)));
        assert_eq!(d.state().history().len(), 1);
        assert_eq!(d.state().circuit().len(), 1);
    }
}
