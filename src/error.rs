// src/error.rs
//! Error taxonomy for operator construction and combination.
//!
//! Every failure is reported synchronously at the call that detects it;
//! nothing is retried or partially applied. An operation either returns a
//! fully valid value or fails before producing one.

use thiserror::Error;

/// Errors produced while constructing or combining operators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QopError {
    /// The source object cannot be turned into a dense matrix, e.g. a
    /// circuit containing a measurement or a malformed Pauli label.
    #[error("cannot convert {source_kind} to an operator: {reason}")]
    Conversion {
        /// Kind of object the conversion was attempted on.
        source_kind: &'static str,
        /// Why the conversion failed.
        reason: String,
    },

    /// Matrix shapes or subsystem dimensions are incompatible for the
    /// requested combination.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// A unitary operator was required but the candidate fails the
    /// unitarity check at the given tolerance.
    #[error("operator is not unitary within tolerance {atol}")]
    NotUnitary {
        /// Absolute tolerance the check was performed with.
        atol: f64,
    },
}

/// Crate-wide result alias.
pub type QopResult<T> = Result<T, QopError>;

impl QopError {
    pub(crate) fn conversion(source_kind: &'static str, reason: impl Into<String>) -> Self {
        QopError::Conversion {
            source_kind,
            reason: reason.into(),
        }
    }

    pub(crate) fn dims(reason: impl Into<String>) -> Self {
        QopError::DimensionMismatch(reason.into())
    }
}
