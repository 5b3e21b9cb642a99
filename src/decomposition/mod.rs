//! Matrix decompositions and the triangular solvers they share.
//!
//! Each decomposition is built from a [Matrix] by its `new` function, which keeps a read-only
//! copy of the input and computes the factorization immediately. Construction either succeeds
//! completely or fails with an error; there is no partially factorized state. Derived factors are
//! read-only matrices owned by the decomposition.

pub mod cholesky;
pub mod lu;
pub mod qr;

use crate::{Conflict, Matrix, Result};

/// Operations common to all decompositions.
pub trait Decomposition {
    /// The decomposed matrix. This is a read-only copy taken at construction, so the
    /// decomposition stays valid if the caller keeps modifying the original.
    fn matrix(&self) -> &Matrix;

    /// Solve `A·x = b` for a column vector `b`, where `A` is [Decomposition::matrix].
    ///
    /// # Errors
    /// - [Conflict::NotColumnVector] if `b` does not have exactly one column.
    /// - [Conflict::RowCountMismatch] if `b` does not have as many rows as `A`.
    /// - Decomposition specific conditions, see the implementations.
    fn solve(&self, b : &Matrix) -> Result<Matrix>;
}

/// How the diagonal of a triangular matrix is interpreted by the substitution solvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagonal {
    /// The diagonal is taken to be all ones, whatever is stored there.
    Unit,
    /// The stored diagonal is used.
    Explicit,
}

/// Check that `b` is a column vector with `rows` rows.
pub(crate) fn check_rhs(b : &Matrix, rows : usize) -> Result<()> {
    if b.columns() != 1 {
        Err(Conflict::NotColumnVector{ columns : b.columns() }.into())
    }
    else if b.rows() != rows {
        Err(Conflict::RowCountMismatch{ expected : rows, got : b.rows() }.into())
    }
    else {
        Ok(())
    }
}

/// Solve `L·y = b` for lower triangular `L` by forward substitution. Only the lower triangle
/// (and, for [Diagonal::Explicit], the diagonal) of `l` is read.
///
/// # Errors
/// - [Conflict::NotSquare] if `l` is not square.
/// - [Conflict::NotColumnVector] or [Conflict::RowCountMismatch] if `b` is not a column vector
///   with as many rows as `l`.
pub fn forward_substitution(l : &Matrix, b : &Matrix, diagonal : Diagonal) -> Result<Matrix> {
    l.check_square()?;
    check_rhs(b, l.rows())?;
    Ok(forward_by(l.rows(), |i,j| l.at(i, j), b.data(), diagonal))
}

/// Solve `U·x = y` for upper triangular `U` by backward substitution. Only the upper triangle
/// of `u` is read.
///
/// # Errors
/// - [Conflict::NotSquare] if `u` is not square.
/// - [Conflict::NotColumnVector] or [Conflict::RowCountMismatch] if `y` is not a column vector
///   with as many rows as `u`.
pub fn backward_substitution(u : &Matrix, y : &Matrix) -> Result<Matrix> {
    u.check_square()?;
    check_rhs(y, u.rows())?;
    Ok(backward_by(u.rows(), |i,j| u.at(i, j), y.data()))
}

/// Forward substitution over an `n × n` lower triangle given by the accessor `l`.
pub(crate) fn forward_by<F>(n : usize, l : F, b : &[f64], diagonal : Diagonal) -> Matrix where F : Fn(usize,usize) -> f64 {
    let mut y = vec![0.0; n];
    for i in 0..n {
        let s : f64 = (0..i).map(|j| l(i, j) * y[j]).sum();
        y[i] = match diagonal {
            Diagonal::Unit     => b[i] - s,
            Diagonal::Explicit => (b[i] - s) / l(i, i),
        };
    }
    Matrix::from_parts(n, 1, y)
}

/// Backward substitution over an `n × n` upper triangle given by the accessor `u`.
pub(crate) fn backward_by<F>(n : usize, u : F, y : &[f64]) -> Matrix where F : Fn(usize,usize) -> f64 {
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let s : f64 = (i+1..n).map(|j| u(i, j) * x[j]).sum();
        x[i] = (y[i] - s) / u(i, i);
    }
    Matrix::from_parts(n, 1, x)
}
