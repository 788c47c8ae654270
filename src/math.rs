// src/math.rs
//! Dense complex-matrix primitives shared across the crate.

use ndarray::Array2;
use num_complex::Complex64;

/// Kronecker product `a ⊗ b`.
///
/// `b` occupies the fast (low) index block, so in the subsystem ordering
/// used throughout this crate `b` becomes the lower-indexed subsystems.
pub fn kron(a: &Array2<Complex64>, b: &Array2<Complex64>) -> Array2<Complex64> {
    let (ar, ac) = a.dim();
    let (br, bc) = b.dim();

    let mut result = Array2::zeros((ar * br, ac * bc));
    for i in 0..ar {
        for j in 0..ac {
            for k in 0..br {
                for l in 0..bc {
                    result[[i * br + k, j * bc + l]] = a[[i, j]] * b[[k, l]];
                }
            }
        }
    }
    result
}

/// Conjugate transpose.
pub fn dagger(m: &Array2<Complex64>) -> Array2<Complex64> {
    let (rows, cols) = m.dim();
    let mut result = Array2::zeros((cols, rows));
    for i in 0..rows {
        for j in 0..cols {
            result[[j, i]] = m[[i, j]].conj();
        }
    }
    result
}

/// Complex identity matrix of size `n`.
pub fn eye(n: usize) -> Array2<Complex64> {
    Array2::eye(n)
}

/// Elementwise approximate equality: every entry of `a - b` has modulus at
/// most `atol`. Shapes must match exactly.
pub fn allclose(a: &Array2<Complex64>, b: &Array2<Complex64>, atol: f64) -> bool {
    if a.dim() != b.dim() {
        return false;
    }
    a.iter().zip(b.iter()).all(|(x, y)| (x - y).norm() <= atol)
}
