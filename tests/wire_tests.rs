// tests/wire_tests.rs

use qsim::circuits::wire::to_json;
use qsim::{CircuitBuilder, Gate, GateKind, SimError, Simulator, WarningKind, parse_circuit};

#[test]
fn test_lowercase_types_and_step_positions() -> Result<(), SimError> {
    let json = r#"{"gates": [
        [{"type": "h", "targets": [0]}, {"type": "h", "targets": [1]}],
        [],
        [{"type": "ccnot", "targets": [0, 1, 2]}]
    ]}"#;
    let parsed = parse_circuit(json, 0.0)?;
    assert!(parsed.warnings.is_empty());
    let stats = parsed.circuit.stats();
    assert_eq!(stats.depth, 3);
    assert_eq!(stats.total_gates, 3);
    assert_eq!(stats.width, 3);
    assert_eq!(stats.per_kind.get(&GateKind::H), Some(&2));
    Ok(())
}

#[test]
fn test_parse_and_run_warnings_are_merged() -> Result<(), SimError> {
    let json = r#"{"gates": [[{"type": "X", "targets": [0]}],
                             [{"type": "NOPE", "targets": [0]}, {"type": "CNOT", "targets": [1, 1]}]]}"#;
    let result = Simulator::new().run_json(json, 2)?;
    let warnings = result.warnings();
    assert_eq!(warnings.len(), 2);
    assert_eq!((warnings[0].step, warnings[0].position), (1, 0));
    assert_eq!(warnings[1].kind, WarningKind::RepeatedQubit { qubit: 1 });
    // the CNOT is entry 1 of its step in the document
    assert_eq!((warnings[1].step, warnings[1].position), (1, 1));
    assert_eq!(result.gates_applied(), 1);
    assert_eq!(result.gates_skipped(), 2);
    Ok(())
}

#[test]
fn test_serialized_circuit_runs_identically() -> Result<(), SimError> {
    let circuit = CircuitBuilder::new()
        .step([Gate::H { target: 0 }, Gate::Rx { target: 1, theta: 0.3 }])
        .gate(Gate::Cnot { control: 0, target: 1 })
        .build();
    let json = to_json(&circuit)?;

    let sim = Simulator::new();
    let direct = sim.run(&circuit, 2)?;
    let via_wire = sim.run_json(&json, 2)?;
    assert_eq!(direct.state(), via_wire.state());
    Ok(())
}

#[test]
fn test_gates_field_must_be_nested_lists() {
    let result = Simulator::new().run_json(r#"{"gates": [{"type": "H", "targets": [0]}]}"#, 1);
    assert!(matches!(result, Err(SimError::MalformedCircuit { .. })));
}
