// src/circuit.rs
//! A minimal instruction-list circuit.
//!
//! The circuit exists as the conversion collaborator the operator core
//! consumes and feeds: gate sequences fold into a single operator, and an
//! externally built operator can be inserted back as a unitary step. It is
//! not a compiler or a simulator.

use serde::{Deserialize, Serialize};

use crate::error::{QopError, QopResult};
use crate::gate::Gate;
use crate::operator::{Operator, DEFAULT_ATOL};

/// One step of a circuit.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Instruction {
    /// A named gate applied to the listed qubits.
    Gate {
        /// The gate.
        gate: Gate,
        /// Target qubits; `qubits[k]` receives the gate's subsystem `k`.
        qubits: Vec<usize>,
    },
    /// An arbitrary unitary operator inserted on the listed qubits.
    Unitary {
        /// The operator, unitary within [`DEFAULT_ATOL`].
        operator: Operator,
        /// Target qubits; `qubits[k]` receives the operator's subsystem `k`.
        qubits: Vec<usize>,
    },
    /// Measurement of a single qubit. Not matrix-representable.
    Measure {
        /// The measured qubit.
        qubit: usize,
    },
    /// Reset of a single qubit to |0⟩. Not matrix-representable.
    Reset {
        /// The reset qubit.
        qubit: usize,
    },
}

/// An ordered list of instructions over a fixed qubit register.
///
/// Deserialization replays every instruction through the checked push
/// methods, so a serialized form cannot smuggle in out-of-range qubits or a
/// non-unitary `Unitary` step.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawCircuit")]
pub struct Circuit {
    qubit_count: usize,
    instructions: Vec<Instruction>,
}

/// Unvalidated mirror of [`Circuit`] used as the deserialization target.
#[derive(Deserialize)]
struct RawCircuit {
    qubit_count: usize,
    instructions: Vec<Instruction>,
}

impl TryFrom<RawCircuit> for Circuit {
    type Error = QopError;

    fn try_from(raw: RawCircuit) -> QopResult<Circuit> {
        let mut circuit = Circuit::new(raw.qubit_count);
        for instruction in raw.instructions {
            match instruction {
                Instruction::Gate { gate, qubits } => circuit.push_gate(gate, &qubits)?,
                Instruction::Unitary { operator, qubits } => {
                    circuit.push_unitary(operator, &qubits)?
                }
                Instruction::Measure { qubit } => circuit.measure(qubit)?,
                Instruction::Reset { qubit } => circuit.reset(qubit)?,
            }
        }
        Ok(circuit)
    }
}

impl Circuit {
    /// Create an empty circuit on `qubit_count` qubits.
    pub fn new(qubit_count: usize) -> Self {
        Circuit {
            qubit_count,
            instructions: Vec::new(),
        }
    }

    /// Number of qubits in the register.
    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    /// Number of recorded instructions.
    pub fn instruction_count(&self) -> usize {
        self.instructions.len()
    }

    /// The recorded instructions, in application order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    fn check_qubits(&self, qubits: &[usize], arity: usize, what: &str) -> QopResult<()> {
        if qubits.len() != arity {
            return Err(QopError::dims(format!(
                "{} acts on {} qubits, but {} were specified",
                what,
                arity,
                qubits.len()
            )));
        }
        for (k, &q) in qubits.iter().enumerate() {
            if q >= self.qubit_count {
                return Err(QopError::dims(format!(
                    "qubit index {} out of range for a {}-qubit circuit",
                    q, self.qubit_count
                )));
            }
            if qubits[..k].contains(&q) {
                return Err(QopError::dims(format!("duplicate qubit index {}", q)));
            }
        }
        Ok(())
    }

    /// Append a gate. Arity and qubit indices are validated.
    pub fn push_gate(&mut self, gate: Gate, qubits: &[usize]) -> QopResult<()> {
        self.check_qubits(qubits, gate.num_qubits(), &gate.to_string())?;
        self.instructions.push(Instruction::Gate {
            gate,
            qubits: qubits.to_vec(),
        });
        Ok(())
    }

    /// Insert an operator as a unitary step.
    ///
    /// The operator must be square with all-qubit (dimension-2) subsystems
    /// matching the listed qubits, and unitary within [`DEFAULT_ATOL`];
    /// otherwise the insertion fails with
    /// [`QopError::NotUnitary`] (or a dimension mismatch for shape
    /// problems) and the circuit is left unchanged.
    pub fn push_unitary(&mut self, operator: Operator, qubits: &[usize]) -> QopResult<()> {
        if operator.input_dims() != operator.output_dims() {
            return Err(QopError::dims(format!(
                "unitary insertion requires a square operator, got {}",
                operator
            )));
        }
        if operator.input_dims().iter().any(|&d| d != 2) {
            return Err(QopError::dims(format!(
                "unitary insertion requires qubit subsystems, got dims {:?}",
                operator.input_dims()
            )));
        }
        self.check_qubits(qubits, operator.input_dims().len(), "unitary")?;
        if !operator.is_unitary(DEFAULT_ATOL) {
            return Err(QopError::NotUnitary { atol: DEFAULT_ATOL });
        }
        self.instructions.push(Instruction::Unitary {
            operator,
            qubits: qubits.to_vec(),
        });
        Ok(())
    }

    /// Record a measurement of `qubit`. The circuit stays valid but can no
    /// longer convert to an operator.
    pub fn measure(&mut self, qubit: usize) -> QopResult<()> {
        self.check_qubits(&[qubit], 1, "measure")?;
        self.instructions.push(Instruction::Measure { qubit });
        Ok(())
    }

    /// Record a reset of `qubit`. The circuit stays valid but can no longer
    /// convert to an operator.
    pub fn reset(&mut self, qubit: usize) -> QopResult<()> {
        self.check_qubits(&[qubit], 1, "reset")?;
        self.instructions.push(Instruction::Reset { qubit });
        Ok(())
    }

    /// Fold the circuit into a single operator by composing each
    /// instruction onto the identity, targeted at its qubits.
    ///
    /// Fails with a conversion error if the circuit contains any
    /// measurement or reset.
    pub fn to_operator(&self) -> QopResult<Operator> {
        let mut result = Operator::identity(&vec![2; self.qubit_count])?;
        for instruction in &self.instructions {
            match instruction {
                Instruction::Gate { gate, qubits } => {
                    result = result.compose(gate, Some(qubits.as_slice()), false)?;
                }
                Instruction::Unitary { operator, qubits } => {
                    result = result.compose(operator, Some(qubits.as_slice()), false)?;
                }
                Instruction::Measure { qubit } => {
                    return Err(QopError::conversion(
                        "circuit",
                        format!("measurement of qubit {} has no matrix representation", qubit),
                    ));
                }
                Instruction::Reset { qubit } => {
                    return Err(QopError::conversion(
                        "circuit",
                        format!("reset of qubit {} has no matrix representation", qubit),
                    ));
                }
            }
        }
        Ok(result)
    }
}
