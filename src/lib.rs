//! Dense double precision matrices and the classical direct factorizations.
//!
//! The crate provides one container type, [Matrix], and three decompositions built from it:
//! - [LuDecomposition] Doolittle factorization `A = L·U` without pivoting,
//! - [CholeskyDecomposition] factorization `A = L·Lᵀ` of symmetric positive definite matrices,
//! - [QrDecomposition] Householder factorization `A = Q·R` of any rectangular matrix.
//!
//! Scalar and matrix properties of a [Matrix] (trace, determinant, rank, transpose and
//! inverse) are computed by the elimination routines in [operations] the first time they are
//! requested and cached until the matrix is next modified.
//!
//! ```
//! use beamat::*;
//!
//! let a = Matrix::from_array(&[[4.0, 3.0],
//!                              [6.0, 3.0]]);
//! let b = Matrix::from_array(&[[1.0],
//!                              [1.5]]);
//! let lu = LuDecomposition::new(&a).unwrap();
//! let x = lu.solve(&b).unwrap();
//! assert!((x.get(0,0).unwrap() - 0.25).abs() < EPSILON);
//! assert!(x.get(1,0).unwrap().abs() < EPSILON);
//! assert!((a.determinant().unwrap() + 6.0).abs() < EPSILON);
//! ```
//!
//! All errors are reported as [MatrixError]; nothing in the crate retries or silently coerces a
//! failed operation.

pub mod error;
pub mod matrix;
pub mod operations;
pub mod decomposition;

pub use error::{Conflict, MatrixError, Result};
pub use matrix::Matrix;
pub use decomposition::{
    Decomposition,
    Diagonal,
    backward_substitution,
    forward_substitution,
    cholesky::CholeskyDecomposition,
    lu::LuDecomposition,
    qr::QrDecomposition,
};

/// Tolerance used for every floating point comparison against zero, or between two matrices.
pub const EPSILON : f64 = 1e-12;
