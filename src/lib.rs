//! Dense-matrix quantum operators
//!
//! This crate provides a value type for linear maps between
//! finite-dimensional complex vector spaces: a dense matrix labeled with a
//! factored description of its input and output subsystem dimensions. It
//! supports tensor products, subsystem-targeted composition, linear
//! combination, unitarity checks and approximate equality, plus conversion
//! from gates, Pauli labels and circuits through a single capability trait.

pub mod circuit;
pub mod convert;
pub mod dims;
pub mod error;
pub mod gate;
pub mod math;
pub mod metrics;
pub mod operator;
pub mod pauli;
pub mod random;

pub use circuit::{Circuit, Instruction};
pub use convert::ToOperator;
pub use error::{QopError, QopResult};
pub use gate::Gate;
pub use metrics::{average_gate_fidelity, process_fidelity};
pub use operator::{Operator, DEFAULT_ATOL};
pub use pauli::PauliString;
pub use random::random_unitary;

// Create a prelude module for convenient imports
pub mod prelude {
    pub use crate::circuit::{Circuit, Instruction};
    pub use crate::convert::ToOperator;
    pub use crate::error::{QopError, QopResult};
    pub use crate::gate::Gate;
    pub use crate::operator::{Operator, DEFAULT_ATOL};
    pub use crate::pauli::PauliString;
}

// Version and crate information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
