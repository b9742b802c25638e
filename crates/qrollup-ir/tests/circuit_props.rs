//! Property tests for operand validation.

use proptest::prelude::*;
use qrollup_ir::{Circuit, IrError, QubitId, StandardGate};

const SINGLE: [StandardGate; 9] = [
    StandardGate::I,
    StandardGate::X,
    StandardGate::Y,
    StandardGate::Z,
    StandardGate::H,
    StandardGate::S,
    StandardGate::Sdg,
    StandardGate::T,
    StandardGate::Tdg,
];

proptest! {
    #[test]
    fn in_range_single_qubit_gate_appends_once(
        n in 1u32..8,
        gate in 0usize..SINGLE.len(),
        q in 0u32..8,
    ) {
        prop_assume!(q < n);
        let mut circuit = Circuit::with_size("p", n, n);
        circuit.gate(SINGLE[gate], [QubitId(q)]).unwrap();
        prop_assert_eq!(circuit.len(), 1);
    }

    #[test]
    fn out_of_range_qubit_is_rejected(n in 1u32..8, offset in 0u32..100) {
        let mut circuit = Circuit::with_size("p", n, n);
        let result = circuit.cx(QubitId(0), QubitId(n + offset));
        let rejected = matches!(result, Err(IrError::QubitNotFound { .. }));
        prop_assert!(rejected);
        prop_assert!(circuit.is_empty());
    }
}
