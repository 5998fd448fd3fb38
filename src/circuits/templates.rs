// src/circuits/templates.rs

//! Ready-made circuits for common textbook states and small algorithms.
//!
//! Each builder returns a plain [`Circuit`]; the [`Template`] table adds the
//! metadata used to browse them (category, difficulty, tags). Qubit 0 is the
//! most-significant bit, so a Bell pair on qubits 0 and 1 ends in `"00"` and
//! `"11"`.

use super::{Circuit, CircuitBuilder};
use crate::core::DEFAULT_ROTATION_ANGLE;
use crate::operations::Gate;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Beginner,
    Intermediate,
    Advanced,
    Algorithm,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Beginner => "beginner",
            Category::Intermediate => "intermediate",
            Category::Advanced => "advanced",
            Category::Algorithm => "algorithm",
        };
        f.write_str(name)
    }
}

/// A named circuit with browsing metadata.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: Category,
    /// 1 (easiest) to 5.
    pub difficulty: u8,
    /// Register size the circuit is written for.
    pub num_qubits: usize,
    pub tags: &'static [&'static str],
    build: fn() -> Circuit,
}

impl Template {
    /// Builds a fresh copy of the template's circuit.
    pub fn circuit(&self) -> Circuit {
        (self.build)()
    }

    fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(query)
            || self.description.to_lowercase().contains(query)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(query))
    }
}

static TEMPLATES: [Template; 10] = [
    Template {
        id: "superposition-basic",
        name: "Quantum Superposition",
        description: "A single qubit in equal superposition of |0> and |1>",
        category: Category::Beginner,
        difficulty: 1,
        num_qubits: 1,
        tags: &["superposition", "hadamard", "single-qubit"],
        build: superposition,
    },
    Template {
        id: "pauli-gates",
        name: "Pauli Gates (X, Y, Z)",
        description: "X, Y and Z applied in sequence to one qubit",
        category: Category::Beginner,
        difficulty: 2,
        num_qubits: 1,
        tags: &["pauli-gates", "single-qubit", "rotations"],
        build: pauli_sequence,
    },
    Template {
        id: "bell-state",
        name: "Bell State (Entanglement)",
        description: "Maximally entangled pair (|00> + |11>) / sqrt(2)",
        category: Category::Intermediate,
        difficulty: 3,
        num_qubits: 2,
        tags: &["entanglement", "bell-state", "multi-qubit", "cnot"],
        build: bell_pair,
    },
    Template {
        id: "quantum-interference",
        name: "Quantum Interference",
        description: "H, Z, H: the phase flip turns destructive interference into |1>",
        category: Category::Intermediate,
        difficulty: 3,
        num_qubits: 1,
        tags: &["interference", "wave-behavior", "hadamard", "phase"],
        build: interference,
    },
    Template {
        id: "quantum-coin-flip",
        name: "Quantum Coin Flip",
        description: "Fair random bit from a Hadamard superposition",
        category: Category::Intermediate,
        difficulty: 2,
        num_qubits: 1,
        tags: &["randomness", "superposition", "cryptography"],
        build: coin_flip,
    },
    Template {
        id: "ghz-3",
        name: "GHZ State (3 qubits)",
        description: "Three-qubit entangled state (|000> + |111>) / sqrt(2)",
        category: Category::Intermediate,
        difficulty: 3,
        num_qubits: 3,
        tags: &["entanglement", "ghz", "multi-qubit", "cnot"],
        build: || ghz(3),
    },
    Template {
        id: "grover-search-2bit",
        name: "Grover Search (2-bit)",
        description: "Amplitude amplification on two qubits, ending in |11>",
        category: Category::Advanced,
        difficulty: 4,
        num_qubits: 2,
        tags: &["grover", "search-algorithm", "amplitude-amplification"],
        build: grover_2bit,
    },
    Template {
        id: "quantum-fourier-transform",
        name: "Quantum Fourier Transform",
        description: "Hadamard layer followed by a CNOT chain over three qubits",
        category: Category::Advanced,
        difficulty: 5,
        num_qubits: 3,
        tags: &["fourier-transform", "phase-estimation", "shor-algorithm"],
        build: fourier_3,
    },
    Template {
        id: "vqe-simple",
        name: "Variational Quantum Eigensolver (VQE)",
        description: "Two-qubit ansatz with one RX and one RY parameter",
        category: Category::Algorithm,
        difficulty: 4,
        num_qubits: 2,
        tags: &["vqe", "hybrid-algorithm", "chemistry", "optimization"],
        build: || vqe(DEFAULT_ROTATION_ANGLE, DEFAULT_ROTATION_ANGLE),
    },
    Template {
        id: "qaoa-simple",
        name: "Quantum Approximate Optimization Algorithm (QAOA)",
        description: "One QAOA layer with a shared RX mixing angle",
        category: Category::Algorithm,
        difficulty: 4,
        num_qubits: 2,
        tags: &["qaoa", "optimization", "max-cut", "combinatorial"],
        build: || qaoa(DEFAULT_ROTATION_ANGLE),
    },
];

/// Every built-in template, easiest first within each category.
pub fn all() -> &'static [Template] {
    &TEMPLATES
}

pub fn by_id(id: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.id == id)
}

pub fn by_category(category: Category) -> Vec<&'static Template> {
    TEMPLATES.iter().filter(|t| t.category == category).collect()
}

/// Templates whose difficulty is at most `max_difficulty`.
pub fn up_to_difficulty(max_difficulty: u8) -> Vec<&'static Template> {
    TEMPLATES.iter().filter(|t| t.difficulty <= max_difficulty).collect()
}

/// Case-insensitive substring search over name, description and tags.
pub fn search(query: &str) -> Vec<&'static Template> {
    let query = query.to_lowercase();
    TEMPLATES.iter().filter(|t| t.matches(&query)).collect()
}

pub fn superposition() -> Circuit {
    CircuitBuilder::new().gate(Gate::H { target: 0 }).build()
}

pub fn pauli_sequence() -> Circuit {
    CircuitBuilder::new()
        .gate(Gate::X { target: 0 })
        .gate(Gate::Y { target: 0 })
        .gate(Gate::Z { target: 0 })
        .build()
}

/// `H(0)` then `CNOT(0 -> 1)`.
pub fn bell_pair() -> Circuit {
    CircuitBuilder::new()
        .gate(Gate::H { target: 0 })
        .gate(Gate::Cnot { control: 0, target: 1 })
        .build()
}

pub fn interference() -> Circuit {
    CircuitBuilder::new()
        .gate(Gate::H { target: 0 })
        .gate(Gate::Z { target: 0 })
        .gate(Gate::H { target: 0 })
        .build()
}

pub fn coin_flip() -> Circuit {
    superposition()
}

/// `H(0)` followed by a CNOT ladder `0 -> 1 -> ... -> n-1`. Empty for `n == 0`.
pub fn ghz(num_qubits: usize) -> Circuit {
    let mut circuit = Circuit::new();
    if num_qubits == 0 {
        return circuit;
    }
    circuit.add_gate(Gate::H { target: 0 });
    for q in 1..num_qubits {
        circuit.add_gate(Gate::Cnot { control: q - 1, target: q });
    }
    circuit
}

/// Uniform superposition, phase oracle on both qubits, then the Hadamard layer again.
pub fn grover_2bit() -> Circuit {
    CircuitBuilder::new()
        .step([Gate::H { target: 0 }, Gate::H { target: 1 }])
        .step([Gate::Z { target: 0 }, Gate::Z { target: 1 }])
        .step([Gate::H { target: 0 }, Gate::H { target: 1 }])
        .build()
}

pub fn fourier_3() -> Circuit {
    CircuitBuilder::new()
        .step((0..3).map(|q| Gate::H { target: q }))
        .gate(Gate::Cnot { control: 0, target: 1 })
        .gate(Gate::Cnot { control: 1, target: 2 })
        .build()
}

pub fn vqe(theta_x: f64, theta_y: f64) -> Circuit {
    CircuitBuilder::new()
        .step([Gate::H { target: 0 }, Gate::H { target: 1 }])
        .gate(Gate::Cnot { control: 0, target: 1 })
        .step([Gate::Rx { target: 0, theta: theta_x }, Gate::Ry { target: 1, theta: theta_y }])
        .build()
}

pub fn qaoa(beta: f64) -> Circuit {
    CircuitBuilder::new()
        .step([Gate::H { target: 0 }, Gate::H { target: 1 }])
        .gate(Gate::Cnot { control: 0, target: 1 })
        .step([Gate::Rx { target: 0, theta: beta }, Gate::Rx { target: 1, theta: beta }])
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Result;
    use crate::simulation::run_circuit;
    use std::collections::BTreeMap;
    use std::f64::consts::PI;

    fn probabilities(circuit: &Circuit, num_qubits: usize) -> Result<BTreeMap<String, f64>> {
        let result = run_circuit(circuit, num_qubits)?;
        assert!(result.warnings().is_empty(), "unexpected warnings: {:?}", result.warnings());
        Ok(result.probability_map(1e-9))
    }

    fn assert_distribution(actual: &BTreeMap<String, f64>, expected: &[(&str, f64)]) {
        assert_eq!(actual.len(), expected.len(), "outcomes: {:?}", actual);
        for (label, p) in expected {
            let got = actual.get(*label).copied().unwrap_or(0.0);
            assert!((got - p).abs() < 1e-9, "P({}) = {}, expected {}", label, got, p);
        }
    }

    #[test]
    fn test_every_template_runs_cleanly_on_its_register() -> Result<()> {
        for template in all() {
            let circuit = template.circuit();
            assert!(circuit.max_qubit().is_some_and(|q| q < template.num_qubits), "{}", template.id);
            assert!((1..=5).contains(&template.difficulty), "{}", template.id);
            let result = run_circuit(&circuit, template.num_qubits)?;
            assert!(!result.is_partial(), "{} ran partially", template.id);
        }
        Ok(())
    }

    #[test]
    fn test_bell_pair_outcomes() -> Result<()> {
        assert_distribution(&probabilities(&bell_pair(), 2)?, &[("00", 0.5), ("11", 0.5)]);
        Ok(())
    }

    #[test]
    fn test_interference_and_grover_are_deterministic() -> Result<()> {
        assert_distribution(&probabilities(&interference(), 1)?, &[("1", 1.0)]);
        assert_distribution(&probabilities(&grover_2bit(), 2)?, &[("11", 1.0)]);
        // XYZ|0> = -i|0>
        assert_distribution(&probabilities(&pauli_sequence(), 1)?, &[("0", 1.0)]);
        Ok(())
    }

    #[test]
    fn test_ghz_outcomes() -> Result<()> {
        assert_distribution(&probabilities(&ghz(4), 4)?, &[("0000", 0.5), ("1111", 0.5)]);
        assert_eq!(ghz(4).num_steps(), 4);
        assert!(ghz(0).is_empty());
        assert_distribution(&probabilities(&ghz(1), 1)?, &[("0", 0.5), ("1", 0.5)]);
        Ok(())
    }

    #[test]
    fn test_fourier_layer_and_qaoa_at_pi_stay_uniform() -> Result<()> {
        let uniform_3: Vec<(String, f64)> = (0..8).map(|i| (format!("{:03b}", i), 0.125)).collect();
        let expected: Vec<(&str, f64)> = uniform_3.iter().map(|(l, p)| (l.as_str(), *p)).collect();
        assert_distribution(&probabilities(&fourier_3(), 3)?, &expected);

        // RX(pi) is X up to a global phase and |+> is an eigenstate of X
        assert_distribution(
            &probabilities(&qaoa(PI), 2)?,
            &[("00", 0.25), ("01", 0.25), ("10", 0.25), ("11", 0.25)],
        );
        Ok(())
    }

    #[test]
    fn test_variational_angles_are_placed() {
        let circuit = vqe(0.1, 0.2);
        assert_eq!(
            circuit.steps()[2],
            vec![Gate::Rx { target: 0, theta: 0.1 }, Gate::Ry { target: 1, theta: 0.2 }]
        );
        let stock = by_id("vqe-simple").map(Template::circuit);
        assert_eq!(stock, Some(vqe(DEFAULT_ROTATION_ANGLE, DEFAULT_ROTATION_ANGLE)));
    }

    #[test]
    fn test_lookups() {
        assert_eq!(by_id("bell-state").map(|t| t.num_qubits), Some(2));
        assert!(by_id("measurement-basic").is_none());

        let algorithms: Vec<_> = by_category(Category::Algorithm).iter().map(|t| t.id).collect();
        assert_eq!(algorithms, vec!["vqe-simple", "qaoa-simple"]);

        let easy = up_to_difficulty(2);
        assert!(easy.iter().all(|t| t.difficulty <= 2));
        assert_eq!(easy.len(), 3);
        assert_eq!(up_to_difficulty(5).len(), all().len());

        let entangled: Vec<_> = search("ENTANGLE").iter().map(|t| t.id).collect();
        assert_eq!(entangled, vec!["bell-state", "ghz-3"]);
        assert_eq!(search("max-cut").len(), 1);
        assert!(search("teleport").is_empty());
        assert_eq!(Category::Advanced.to_string(), "advanced");
    }
}
