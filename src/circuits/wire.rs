// src/circuits/wire.rs

//! JSON wire format for circuits.
//!
//! ```json
//! { "gates": [[ { "type": "H", "targets": [1] } ],
//!             [ { "type": "CNOT", "targets": [1, 0] } ],
//!             [ { "type": "RX", "targets": [0], "params": 3.14159 } ]] }
//! ```
//!
//! A document whose `gates` field is not a list of lists is rejected outright.
//! Individual gate entries that cannot be turned into a [`Gate`] are dropped
//! and reported as [`Warning`]s so an interactive caller still gets a partial
//! circuit to simulate.

use super::Circuit;
use crate::core::Result;
use crate::operations::{Gate, GateKind};
use crate::simulation::{Warning, WarningKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One gate entry as it appears on the wire, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawGate {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawCircuit {
    gates: Vec<Vec<Value>>,
}

#[derive(Debug, Serialize)]
struct WireCircuit {
    gates: Vec<Vec<RawGate>>,
}

/// A typed circuit together with the problems found while converting it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCircuit {
    pub circuit: Circuit,
    pub warnings: Vec<Warning>,
    /// `positions[step][i]` is the document position of the `i`-th kept gate
    /// of `step`. Dropped entries leave gaps.
    pub positions: Vec<Vec<usize>>,
}

impl ParsedCircuit {
    /// Document position of the gate at `(step, position)` in the typed circuit.
    pub fn source_position(&self, step: usize, position: usize) -> usize {
        source_position(&self.positions, step, position)
    }
}

pub(crate) fn source_position(positions: &[Vec<usize>], step: usize, position: usize) -> usize {
    positions
        .get(step)
        .and_then(|kept| kept.get(position))
        .copied()
        .unwrap_or(position)
}

impl From<&Gate> for RawGate {
    fn from(gate: &Gate) -> Self {
        RawGate {
            kind: Some(gate.kind().name().to_string()),
            targets: Some(gate.qubits().into_iter().map(|q| q as i64).collect()),
            params: gate.angle(),
        }
    }
}

/// Parses a wire document into a typed [`Circuit`].
///
/// Rotation gates without `params` get `default_angle` and a
/// [`WarningKind::MissingAngle`] warning. Empty steps are preserved so that
/// warning step numbers match the input document.
///
/// # Errors
/// `SimError::MalformedCircuit` if the document is not JSON or its `gates`
/// field is missing or not a nested sequence.
pub fn parse_circuit(json: &str, default_angle: f64) -> Result<ParsedCircuit> {
    let raw: RawCircuit = serde_json::from_str(json)?;

    let mut circuit = Circuit::new();
    let mut warnings = Vec::new();
    let mut positions = Vec::with_capacity(raw.gates.len());

    for (step, entries) in raw.gates.into_iter().enumerate() {
        let mut gates = Vec::with_capacity(entries.len());
        let mut kept = Vec::with_capacity(entries.len());
        for (position, value) in entries.into_iter().enumerate() {
            match convert_gate(value, default_angle) {
                Ok((gate, note)) => {
                    if let Some(kind) = note {
                        tracing::warn!(step, position, %gate, "{}", kind);
                        warnings.push(Warning::new(step, position, kind));
                    }
                    gates.push(gate);
                    kept.push(position);
                }
                Err(kind) => {
                    tracing::warn!(step, position, "dropping gate: {}", kind);
                    warnings.push(Warning::new(step, position, kind));
                }
            }
        }
        circuit.add_step(gates);
        positions.push(kept);
    }

    Ok(ParsedCircuit { circuit, warnings, positions })
}

/// Serializes a typed circuit into the wire form.
pub fn to_json(circuit: &Circuit) -> Result<String> {
    let wire = WireCircuit {
        gates: circuit
            .steps()
            .iter()
            .map(|step| step.iter().map(RawGate::from).collect())
            .collect(),
    };
    Ok(serde_json::to_string(&wire)?)
}

fn malformed(reason: impl Into<String>) -> WarningKind {
    WarningKind::MalformedGate { reason: reason.into() }
}

fn convert_gate(
    value: Value,
    default_angle: f64,
) -> std::result::Result<(Gate, Option<WarningKind>), WarningKind> {
    match &value {
        Value::Null => return Err(malformed("null gate entry")),
        Value::Object(fields) if fields.is_empty() => return Err(malformed("empty gate object")),
        Value::Object(_) => {}
        other => return Err(malformed(format!("gate entry is not an object: {}", other))),
    }

    let raw: RawGate = serde_json::from_value(value).map_err(|e| malformed(e.to_string()))?;

    let name = raw.kind.ok_or_else(|| malformed("missing 'type'"))?;
    let kind: GateKind = name
        .parse()
        .map_err(|_| WarningKind::UnknownGateType { name: name.clone() })?;

    let targets = raw.targets.ok_or_else(|| malformed("missing 'targets'"))?;
    if targets.is_empty() {
        return Err(malformed("empty 'targets'"));
    }
    if targets.len() != kind.arity() {
        return Err(WarningKind::ArityMismatch { kind, expected: kind.arity(), found: targets.len() });
    }
    let qubits = targets
        .iter()
        .map(|&t| usize::try_from(t).map_err(|_| WarningKind::NegativeQubit { qubit: t }))
        .collect::<std::result::Result<Vec<usize>, _>>()?;

    let (theta, note) = if kind.is_rotation() {
        match raw.params {
            Some(theta) => (Some(theta), None),
            None => (
                Some(default_angle),
                Some(WarningKind::MissingAngle { kind, substituted: default_angle }),
            ),
        }
    } else {
        if raw.params.is_some() {
            tracing::debug!(%kind, "ignoring 'params' on a gate without an angle");
        }
        (None, None)
    };

    let gate = Gate::from_parts(kind, &qubits, theta)
        .ok_or_else(|| malformed(format!("cannot build {} from {:?}", kind, qubits)))?;
    Ok((gate, note))
}
