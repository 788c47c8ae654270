// src/operator.rs
//! The `Operator` value type: a dense complex matrix together with the
//! factored dimensions of its input and output subsystems.
//!
//! Operators are immutable; every combination (tensor, compose, linear
//! combination) produces a new value. Subsystem 0 is the fastest-varying
//! index of the flattened matrix axes, so `a.tensor(b)` places `b` on the
//! lower-indexed subsystems.

use std::fmt;
use std::ops::{Add, Mul, Sub};

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::convert::ToOperator;
use crate::dims;
use crate::error::{QopError, QopResult};
use crate::math;
use crate::pauli::PauliString;

/// Default absolute tolerance for equality and unitarity checks.
pub const DEFAULT_ATOL: f64 = 1e-8;

/// A linear map between finite-dimensional complex vector spaces.
///
/// Deserialization routes through [`Operator::with_dims`], so a serialized
/// form whose dims do not factor the matrix shape is rejected.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawOperator")]
pub struct Operator {
    matrix: Array2<Complex64>,
    input_dims: Vec<usize>,
    output_dims: Vec<usize>,
}

/// Unvalidated mirror of [`Operator`] used as the deserialization target.
#[derive(Deserialize)]
struct RawOperator {
    matrix: Array2<Complex64>,
    input_dims: Vec<usize>,
    output_dims: Vec<usize>,
}

impl TryFrom<RawOperator> for Operator {
    type Error = QopError;

    fn try_from(raw: RawOperator) -> QopResult<Operator> {
        Operator::with_dims(raw.matrix, &raw.input_dims, &raw.output_dims)
    }
}

impl Operator {
    /// Wrap a matrix, inferring the subsystem factorization of each axis:
    /// power-of-two extents become qubits, anything else a single
    /// subsystem. Zero-sized matrices are rejected.
    pub fn new(matrix: Array2<Complex64>) -> QopResult<Self> {
        let (rows, cols) = matrix.dim();
        if rows == 0 || cols == 0 {
            return Err(QopError::dims(format!(
                "operator matrix must be non-empty, got {}x{}",
                rows, cols
            )));
        }
        Ok(Operator {
            input_dims: dims::infer_factors(cols),
            output_dims: dims::infer_factors(rows),
            matrix,
        })
    }

    /// Wrap a matrix with an explicit subsystem factorization for each axis.
    pub fn with_dims(
        matrix: Array2<Complex64>,
        input_dims: &[usize],
        output_dims: &[usize],
    ) -> QopResult<Self> {
        let (rows, cols) = matrix.dim();
        dims::check_factors(input_dims, cols, "input")?;
        dims::check_factors(output_dims, rows, "output")?;
        Ok(Operator {
            matrix,
            input_dims: input_dims.to_vec(),
            output_dims: output_dims.to_vec(),
        })
    }

    /// The identity operator over a subsystem factorization.
    pub fn identity(subsystem_dims: &[usize]) -> QopResult<Self> {
        let total = dims::total_dim(subsystem_dims);
        Self::with_dims(math::eye(total), subsystem_dims, subsystem_dims)
    }

    /// Build an operator from a Pauli label such as `"XIZ"`.
    pub fn from_label(label: &str) -> QopResult<Self> {
        PauliString::new(label)?.to_operator()
    }

    /// The underlying matrix, by reference.
    pub fn data(&self) -> &Array2<Complex64> {
        &self.matrix
    }

    /// Consume the operator, yielding its matrix.
    pub fn into_matrix(self) -> Array2<Complex64> {
        self.matrix
    }

    /// Per-subsystem input (column axis) dimensions.
    pub fn input_dims(&self) -> &[usize] {
        &self.input_dims
    }

    /// Per-subsystem output (row axis) dimensions.
    pub fn output_dims(&self) -> &[usize] {
        &self.output_dims
    }

    /// Total input dimension (matrix column count).
    pub fn input_dim(&self) -> usize {
        dims::total_dim(&self.input_dims)
    }

    /// Total output dimension (matrix row count).
    pub fn output_dim(&self) -> usize {
        dims::total_dim(&self.output_dims)
    }

    /// Number of input subsystems. Equals the number of output subsystems
    /// for square operators.
    pub fn num_subsystems(&self) -> usize {
        self.input_dims.len()
    }

    /// Tensor product, with `other` placed on the lower-indexed subsystems.
    ///
    /// Resulting dims are `other`'s followed by `self`'s on both axes. The
    /// Kronecker product of unitaries is unitary, so unitarity is preserved
    /// exactly.
    pub fn tensor(&self, other: &impl ToOperator) -> QopResult<Operator> {
        let other = other.to_operator()?;
        let matrix = math::kron(&self.matrix, &other.matrix);

        let mut input_dims = other.input_dims.clone();
        input_dims.extend_from_slice(&self.input_dims);
        let mut output_dims = other.output_dims.clone();
        output_dims.extend_from_slice(&self.output_dims);

        Ok(Operator {
            matrix,
            input_dims,
            output_dims,
        })
    }

    /// Reversed-order tensor product: `self` becomes the lower-indexed
    /// subsystems. `a.expand(b)` equals `b.tensor(a)`.
    pub fn expand(&self, other: &impl ToOperator) -> QopResult<Operator> {
        other.to_operator()?.tensor(self)
    }

    /// Composition by matrix multiplication.
    ///
    /// With `qargs` omitted and `front == false`, `a.compose(b, None, false)`
    /// applies `b` after `a`: the result matrix is `b.data() @ a.data()` and
    /// `a`'s total output dimension must equal `b`'s total input dimension.
    /// `front == true` reverses the roles, yielding `a.data() @ b.data()`.
    ///
    /// With `qargs` given, `other` acts only on the listed subsystems of
    /// `self` (`qargs[k]` names where `other`'s subsystem `k` lands); it is
    /// embedded identity-padded to full size and composed as above. The
    /// operand must be square subsystem-wise, no larger than `self`, and its
    /// dimensions must match the targeted dimensions of `self` elementwise.
    pub fn compose(
        &self,
        other: &impl ToOperator,
        qargs: Option<&[usize]>,
        front: bool,
    ) -> QopResult<Operator> {
        let other = other.to_operator()?;
        match qargs {
            None => self.compose_full(&other, front),
            Some(qargs) => self.compose_on(&other, qargs, front),
        }
    }

    fn compose_full(&self, other: &Operator, front: bool) -> QopResult<Operator> {
        if front {
            if other.output_dim() != self.input_dim() {
                return Err(QopError::dims(format!(
                    "front composition requires the operand's total output dimension {} \
                     to equal this operator's total input dimension {}",
                    other.output_dim(),
                    self.input_dim()
                )));
            }
            Ok(Operator {
                matrix: self.matrix.dot(&other.matrix),
                input_dims: other.input_dims.clone(),
                output_dims: self.output_dims.clone(),
            })
        } else {
            if self.output_dim() != other.input_dim() {
                return Err(QopError::dims(format!(
                    "composition requires this operator's total output dimension {} \
                     to equal the operand's total input dimension {}",
                    self.output_dim(),
                    other.input_dim()
                )));
            }
            Ok(Operator {
                matrix: other.matrix.dot(&self.matrix),
                input_dims: self.input_dims.clone(),
                output_dims: other.output_dims.clone(),
            })
        }
    }

    fn compose_on(&self, other: &Operator, qargs: &[usize], front: bool) -> QopResult<Operator> {
        if other.input_dims != other.output_dims {
            return Err(QopError::dims(
                "subsystem-targeted composition requires a square operand".to_string(),
            ));
        }
        // The embedding lives on the axis being contracted.
        let base = if front {
            &self.input_dims
        } else {
            &self.output_dims
        };
        if qargs.len() != other.input_dims.len() {
            return Err(QopError::dims(format!(
                "qargs name {} subsystems but the operand has {}",
                qargs.len(),
                other.input_dims.len()
            )));
        }
        if qargs.len() > base.len() {
            return Err(QopError::dims(format!(
                "operand acts on {} subsystems but the target has only {}",
                qargs.len(),
                base.len()
            )));
        }
        let mut seen = vec![false; base.len()];
        for &q in qargs {
            if q >= base.len() {
                return Err(QopError::dims(format!(
                    "qarg {} is out of range for {} subsystems",
                    q,
                    base.len()
                )));
            }
            if seen[q] {
                return Err(QopError::dims(format!("duplicate qarg {}", q)));
            }
            seen[q] = true;
        }
        for (k, &q) in qargs.iter().enumerate() {
            if base[q] != other.input_dims[k] {
                return Err(QopError::dims(format!(
                    "subsystem {} of the target has dimension {} but subsystem {} \
                     of the operand has dimension {}",
                    q, base[q], k, other.input_dims[k]
                )));
            }
        }

        let embedded = Operator {
            matrix: embed(&other.matrix, &other.input_dims, qargs, base),
            input_dims: base.clone(),
            output_dims: base.clone(),
        };
        self.compose_full(&embedded, front)
    }

    /// Elementwise sum. Requires identical matrix shapes; the result
    /// inherits this operator's dims. The sum of unitaries is generally not
    /// unitary.
    pub fn checked_add(&self, other: &impl ToOperator) -> QopResult<Operator> {
        let other = other.to_operator()?;
        self.check_same_shape(&other, "add")?;
        Ok(Operator {
            matrix: &self.matrix + &other.matrix,
            input_dims: self.input_dims.clone(),
            output_dims: self.output_dims.clone(),
        })
    }

    /// Elementwise difference. Same requirements as [`Operator::checked_add`].
    pub fn checked_sub(&self, other: &impl ToOperator) -> QopResult<Operator> {
        let other = other.to_operator()?;
        self.check_same_shape(&other, "subtract")?;
        Ok(Operator {
            matrix: &self.matrix - &other.matrix,
            input_dims: self.input_dims.clone(),
            output_dims: self.output_dims.clone(),
        })
    }

    /// Scalar multiple. Dims are unchanged.
    pub fn scale(&self, factor: Complex64) -> Operator {
        Operator {
            matrix: self.matrix.mapv(|x| x * factor),
            input_dims: self.input_dims.clone(),
            output_dims: self.output_dims.clone(),
        }
    }

    fn check_same_shape(&self, other: &Operator, what: &str) -> QopResult<()> {
        if self.matrix.dim() != other.matrix.dim() {
            return Err(QopError::dims(format!(
                "cannot {} operators of shape {}x{} and {}x{}",
                what,
                self.output_dim(),
                self.input_dim(),
                other.output_dim(),
                other.input_dim()
            )));
        }
        Ok(())
    }

    /// True iff the operator is square and `M @ M†` is the identity within
    /// `atol`.
    pub fn is_unitary(&self, atol: f64) -> bool {
        let (rows, cols) = self.matrix.dim();
        if rows != cols {
            return false;
        }
        let product = self.matrix.dot(&math::dagger(&self.matrix));
        math::allclose(&product, &math::eye(rows), atol)
    }

    /// Approximate equality at an explicit tolerance: the dimension
    /// factorizations must match exactly and every matrix element must agree
    /// within `atol`. Sensitive to global phase.
    pub fn approx_eq(&self, other: &Operator, atol: f64) -> bool {
        self.input_dims == other.input_dims
            && self.output_dims == other.output_dims
            && math::allclose(&self.matrix, &other.matrix, atol)
    }

    /// Conjugate transpose; input and output dims swap.
    pub fn adjoint(&self) -> Operator {
        Operator {
            matrix: math::dagger(&self.matrix),
            input_dims: self.output_dims.clone(),
            output_dims: self.input_dims.clone(),
        }
    }

    /// Elementwise complex conjugate.
    pub fn conjugate(&self) -> Operator {
        Operator {
            matrix: self.matrix.mapv(|x| x.conj()),
            input_dims: self.input_dims.clone(),
            output_dims: self.output_dims.clone(),
        }
    }

    /// Transpose without conjugation; input and output dims swap.
    pub fn transpose(&self) -> Operator {
        Operator {
            matrix: self.matrix.t().to_owned(),
            input_dims: self.output_dims.clone(),
            output_dims: self.input_dims.clone(),
        }
    }
}

/// Embed `small` (square over `small_dims`) into the identity over `base`,
/// acting on the subsystems listed in `qargs`. `qargs[k]` is where the k-th
/// (lowest) subsystem of `small` lands; qarg order is meaningful and the
/// untargeted subsystems stay identity.
fn embed(
    small: &Array2<Complex64>,
    small_dims: &[usize],
    qargs: &[usize],
    base: &[usize],
) -> Array2<Complex64> {
    let total = dims::total_dim(base);
    let base_strides = dims::strides(base);
    let small_strides = dims::strides(small_dims);

    let mut targeted = vec![false; base.len()];
    for &q in qargs {
        targeted[q] = true;
    }

    let mut result = Array2::zeros((total, total));
    for i in 0..total {
        'columns: for j in 0..total {
            // Untargeted subsystems must carry the same digit on both axes.
            for (s, &d) in base.iter().enumerate() {
                if !targeted[s] && (i / base_strides[s]) % d != (j / base_strides[s]) % d {
                    continue 'columns;
                }
            }
            let mut sub_i = 0;
            let mut sub_j = 0;
            for (k, &q) in qargs.iter().enumerate() {
                sub_i += ((i / base_strides[q]) % base[q]) * small_strides[k];
                sub_j += ((j / base_strides[q]) % base[q]) * small_strides[k];
            }
            result[[i, j]] = small[[sub_i, sub_j]];
        }
    }
    result
}

/// Equality at [`DEFAULT_ATOL`]: matching factorizations plus elementwise
/// approximate equality. Two unitaries differing only by a global phase are
/// NOT equal; use [`crate::metrics::process_fidelity`] for phase-insensitive
/// comparison.
impl PartialEq for Operator {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other, DEFAULT_ATOL)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Operator(input_dims={:?}, output_dims={:?})",
            self.input_dims, self.output_dims
        )
    }
}

// Arithmetic sugar. Like ndarray's own operators these panic on shape
// mismatch; the checked_* methods are the error-returning API.

impl Add for &Operator {
    type Output = Operator;

    fn add(self, rhs: &Operator) -> Operator {
        match self.checked_add(rhs) {
            Ok(sum) => sum,
            Err(e) => panic!("operator addition failed: {}", e),
        }
    }
}

impl Add for Operator {
    type Output = Operator;

    fn add(self, rhs: Operator) -> Operator {
        &self + &rhs
    }
}

impl Sub for &Operator {
    type Output = Operator;

    fn sub(self, rhs: &Operator) -> Operator {
        match self.checked_sub(rhs) {
            Ok(difference) => difference,
            Err(e) => panic!("operator subtraction failed: {}", e),
        }
    }
}

impl Sub for Operator {
    type Output = Operator;

    fn sub(self, rhs: Operator) -> Operator {
        &self - &rhs
    }
}

impl Mul<Complex64> for &Operator {
    type Output = Operator;

    fn mul(self, factor: Complex64) -> Operator {
        self.scale(factor)
    }
}

impl Mul<Complex64> for Operator {
    type Output = Operator;

    fn mul(self, factor: Complex64) -> Operator {
        self.scale(factor)
    }
}

impl Mul<f64> for &Operator {
    type Output = Operator;

    fn mul(self, factor: f64) -> Operator {
        self.scale(Complex64::new(factor, 0.0))
    }
}

impl Mul<f64> for Operator {
    type Output = Operator;

    fn mul(self, factor: f64) -> Operator {
        self.scale(Complex64::new(factor, 0.0))
    }
}

impl Mul<&Operator> for Complex64 {
    type Output = Operator;

    fn mul(self, operator: &Operator) -> Operator {
        operator.scale(self)
    }
}

impl Mul<Operator> for Complex64 {
    type Output = Operator;

    fn mul(self, operator: Operator) -> Operator {
        operator.scale(self)
    }
}

impl Mul<&Operator> for f64 {
    type Output = Operator;

    fn mul(self, operator: &Operator) -> Operator {
        operator.scale(Complex64::new(self, 0.0))
    }
}

impl Mul<Operator> for f64 {
    type Output = Operator;

    fn mul(self, operator: Operator) -> Operator {
        operator.scale(Complex64::new(self, 0.0))
    }
}
