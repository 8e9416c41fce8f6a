// tests/simulation_tests.rs

use qsynth::{
    Circuit, CircuitBuilder, Operation, QsynthError, QubitId, SingleQubitGate, TargetGate, Unitary,
    process_fidelity, simulation::Simulator, validate_unitary,
};

const TEST_TOLERANCE: f64 = 1e-9;

// Helper function to create single-qubit gate applications
fn gate(gate: SingleQubitGate, q: usize) -> Operation {
    Operation::Gate { gate, target: QubitId(q) }
}

fn cx(control: usize, target: usize) -> Operation {
    Operation::ControlledX { control: QubitId(control), target: QubitId(target) }
}

fn iswap_circuit() -> Result<Circuit, QsynthError> {
    CircuitBuilder::new(2)
        .add_op(gate(SingleQubitGate::S, 0))
        .add_op(gate(SingleQubitGate::S, 1))
        .add_op(gate(SingleQubitGate::H, 0))
        .add_op(cx(0, 1))
        .add_op(cx(1, 0))
        .add_op(gate(SingleQubitGate::H, 1))
        .build()
}

#[test]
fn test_empty_circuit_is_identity() -> Result<(), QsynthError> {
    let circuit = Circuit::new(2);
    let result = Simulator::new().run(&circuit)?;

    assert_eq!(result.gate_count(), 0);
    assert_eq!(result.unitary(), &Unitary::identity(4), "Empty circuit should implement the identity");
    Ok(())
}

#[test]
fn test_zero_qubit_register_fails_to_simulate() {
    let result = Simulator::new().run(&Circuit::new(0));
    assert!(matches!(result, Err(QsynthError::SimulationError { .. })));
}

#[test]
fn test_iswap_decomposition_reaches_target() -> Result<(), QsynthError> {
    let circuit = iswap_circuit()?;
    let result = Simulator::new().run(&circuit)?;
    let target = TargetGate::ISwap.unitary()?;

    let fidelity = process_fidelity(result.unitary(), &target)?;
    assert!((fidelity - 1.0).abs() < TEST_TOLERANCE, "fidelity was {}", fidelity);
    validate_unitary(result.unitary())?;
    Ok(())
}

#[test]
fn test_empty_circuit_fidelity_to_iswap() -> Result<(), QsynthError> {
    // trace(iSWAP) = 2, so the identity overlaps it by 2/4
    let result = Simulator::new().run(&Circuit::new(2))?;
    let fidelity = process_fidelity(result.unitary(), &TargetGate::ISwap.unitary()?)?;
    assert!((fidelity - 0.5).abs() < TEST_TOLERANCE);
    Ok(())
}

#[test]
fn test_reverse_cnot_matches_cnot_target() -> Result<(), QsynthError> {
    let circuit = CircuitBuilder::new(2).add_op(cx(1, 0)).build()?;
    let result = Simulator::new().run(&circuit)?;
    let fidelity = process_fidelity(result.unitary(), &TargetGate::Cnot.unitary()?)?;
    assert!((fidelity - 1.0).abs() < TEST_TOLERANCE);
    Ok(())
}

#[test]
fn test_three_cnots_make_swap() -> Result<(), QsynthError> {
    let circuit = CircuitBuilder::new(2)
        .add_op(cx(0, 1))
        .add_op(cx(1, 0))
        .add_op(cx(0, 1))
        .build()?;
    let result = Simulator::new().run(&circuit)?;
    let fidelity = process_fidelity(result.unitary(), &TargetGate::Swap.unitary()?)?;
    assert!((fidelity - 1.0).abs() < TEST_TOLERANCE);
    Ok(())
}

#[test]
fn test_h_then_cnot_prepares_bell_target() -> Result<(), QsynthError> {
    // Bell target is CNOT(control q1) · (H on q1)
    let circuit = CircuitBuilder::new(2)
        .add_op(gate(SingleQubitGate::H, 1))
        .add_op(cx(1, 0))
        .build()?;
    let result = Simulator::new().run(&circuit)?;
    let fidelity = process_fidelity(result.unitary(), &TargetGate::BellState.unitary()?)?;
    assert!((fidelity - 1.0).abs() < TEST_TOLERANCE);
    Ok(())
}

#[test]
fn test_self_inverse_gates_cancel() -> Result<(), QsynthError> {
    for g in [SingleQubitGate::H, SingleQubitGate::X, SingleQubitGate::Y, SingleQubitGate::Z] {
        let circuit = CircuitBuilder::new(2).add_op(gate(g, 1)).add_op(gate(g, 1)).build()?;
        let result = Simulator::new().run(&circuit)?;
        let fidelity = process_fidelity(result.unitary(), &Unitary::identity(4))?;
        assert!((fidelity - 1.0).abs() < TEST_TOLERANCE, "{} twice should cancel", g);
    }
    Ok(())
}

#[test]
fn test_four_t_gates_equal_z() -> Result<(), QsynthError> {
    let t_circuit = CircuitBuilder::new(2)
        .add_ops(std::iter::repeat_n(gate(SingleQubitGate::T, 0), 4))
        .build()?;
    let z_circuit = CircuitBuilder::new(2).add_op(gate(SingleQubitGate::Z, 0)).build()?;

    let simulator = Simulator::new();
    let t4 = simulator.run(&t_circuit)?;
    let z = simulator.run(&z_circuit)?;
    let fidelity = process_fidelity(t4.unitary(), z.unitary())?;
    assert!((fidelity - 1.0).abs() < TEST_TOLERANCE);
    Ok(())
}
