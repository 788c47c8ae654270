// src/pauli.rs
//! Labeled Pauli strings.

use std::fmt;

use ndarray::Array2;
use num_complex::Complex64;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{QopError, QopResult};
use crate::gate::Gate;
use crate::math;

/// A tensor product of single-qubit Pauli operators, written as a label
/// such as `"XIZ"`. The rightmost character acts on qubit 0, matching the
/// crate-wide subsystem ordering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauliString {
    label: String,
}

impl PauliString {
    /// Parse a label over the alphabet `I`, `X`, `Y`, `Z`.
    pub fn new(label: &str) -> QopResult<Self> {
        if label.is_empty() {
            return Err(QopError::conversion("Pauli label", "label is empty"));
        }
        for c in label.chars() {
            if !matches!(c, 'I' | 'X' | 'Y' | 'Z') {
                return Err(QopError::conversion(
                    "Pauli label",
                    format!("invalid character '{}' in label \"{}\"", c, label),
                ));
            }
        }
        Ok(PauliString {
            label: label.to_string(),
        })
    }

    /// The label text.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Number of qubits the string acts on.
    pub fn num_qubits(&self) -> usize {
        self.label.len()
    }

    /// Dense matrix of the string. Folding left to right keeps the
    /// rightmost character on the fastest index, i.e. qubit 0.
    pub fn to_matrix(&self) -> Array2<Complex64> {
        let mut matrix = math::eye(1);
        for c in self.label.chars() {
            let factor = match c {
                'I' => Gate::I.matrix(),
                'X' => Gate::X.matrix(),
                'Y' => Gate::Y.matrix(),
                'Z' => Gate::Z.matrix(),
                // new() admits only the four letters above.
                _ => unreachable!("validated at construction"),
            };
            matrix = math::kron(&matrix, &factor);
        }
        matrix
    }

    /// A uniformly random label on `num_qubits` qubits.
    pub fn random<R: Rng + ?Sized>(num_qubits: usize, rng: &mut R) -> QopResult<Self> {
        if num_qubits == 0 {
            return Err(QopError::conversion(
                "Pauli label",
                "cannot sample a label on zero qubits",
            ));
        }
        let alphabet = ['I', 'X', 'Y', 'Z'];
        let label: String = (0..num_qubits)
            .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
            .collect();
        Ok(PauliString { label })
    }
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}
