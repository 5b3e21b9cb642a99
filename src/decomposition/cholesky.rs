//! Cholesky decomposition `A = L·Lᵀ` of a symmetric positive definite matrix.

use log::{debug, trace};

use super::{backward_by, check_rhs, forward_by, Decomposition, Diagonal};
use crate::{Conflict, Matrix, Result};

/// Cholesky factorization with lower triangular factor `L`.
#[derive(Debug)]
pub struct CholeskyDecomposition {
    matrix : Matrix,
    l      : Matrix,
}

impl CholeskyDecomposition {
    /// Factorize `matrix`.
    ///
    /// Column `j` has diagonal `L[j,j] = sqrt(A[j,j] - Σ_{k<j} L[j,k]²)` and below-diagonal entries
    /// `L[i,j] = (A[i,j] - Σ_{k<j} L[i,k]·L[j,k]) / L[j,j]`. Only the lower triangle of `A` is read
    /// after the symmetry check.
    ///
    /// # Errors
    /// - [Conflict::NotSymmetric] if the matrix is not symmetric within [crate::EPSILON]. This
    ///   includes non-square matrices.
    /// - [Conflict::NotPositiveDefinite] as soon as a diagonal radicand is not strictly positive.
    ///   A NaN radicand counts as not positive.
    pub fn new(matrix : &Matrix) -> Result<CholeskyDecomposition> {
        if ! matrix.is_symmetric() {
            return Err(Conflict::NotSymmetric.into());
        }
        let matrix = matrix.as_read_only();
        let n = matrix.rows();
        trace!("cholesky: factorizing {}x{} matrix", n, n);

        let mut l = vec![0.0; n*n];
        for i in 0..n {
            for j in 0..i {
                let s : f64 = (0..j).map(|k| l[i*n + k] * l[j*n + k]).sum();
                l[i*n + j] = (matrix.at(i, j) - s) / l[j*n + j];
            }
            let s : f64 = (0..i).map(|k| l[i*n + k] * l[i*n + k]).sum();
            let radicand = matrix.at(i, i) - s;
            if ! (radicand > 0.0) {
                debug!("cholesky: radicand {:e} in column {} is not positive", radicand, i);
                return Err(Conflict::NotPositiveDefinite{ column : i }.into());
            }
            l[i*n + i] = radicand.sqrt();
        }

        Ok(CholeskyDecomposition{ matrix, l : Matrix::from_parts(n, n, l).into_read_only() })
    }

    /// The lower triangular factor.
    pub fn l(&self) -> &Matrix { &self.l }
}

impl Clone for CholeskyDecomposition {
    /// The copy keeps the decomposed matrix and the factor read-only.
    fn clone(&self) -> CholeskyDecomposition {
        CholeskyDecomposition{ matrix : self.matrix.as_read_only(), l : self.l.as_read_only() }
    }
}

impl Decomposition for CholeskyDecomposition {
    fn matrix(&self) -> &Matrix { &self.matrix }

    /// Solve `A·x = b` by forward substitution `L·y = b` followed by backward substitution
    /// `Lᵀ·x = y`, reading `L` transposed in place.
    fn solve(&self, b : &Matrix) -> Result<Matrix> {
        let n = self.l.rows();
        check_rhs(b, n)?;
        let l = &self.l;
        let y = forward_by(n, |i,j| l.at(i, j), b.data(), Diagonal::Explicit);
        Ok(backward_by(n, |i,j| l.at(j, i), y.data()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EPSILON;

    #[test]
    fn three_by_three() {
        let a = Matrix::from_array(&[[25.0, 15.0,  5.0],
                                     [15.0, 13.0, 11.0],
                                     [ 5.0, 11.0, 21.0]]);
        let chol = CholeskyDecomposition::new(&a).unwrap();
        assert!(chol.l().approx_eq(&Matrix::from_array(&[[5.0, 0.0, 0.0],
                                                         [3.0, 2.0, 0.0],
                                                         [1.0, 4.0, 2.0]]), EPSILON));
        assert!(chol.l().is_read_only());
    }

    #[test]
    fn not_symmetric() {
        let a = Matrix::from_array(&[[4.0, 1.0],[2.0, 3.0]]);
        assert_eq!(CholeskyDecomposition::new(&a).unwrap_err(), Conflict::NotSymmetric.into());
        let a = Matrix::new(2, 3).unwrap();
        assert_eq!(CholeskyDecomposition::new(&a).unwrap_err(), Conflict::NotSymmetric.into());
    }

    #[test]
    fn not_positive_definite() {
        let a = Matrix::from_array(&[[1.0, 2.0],[2.0, 1.0]]);
        assert_eq!(CholeskyDecomposition::new(&a).unwrap_err(), Conflict::NotPositiveDefinite{ column : 1 }.into());
        let a = Matrix::from_array(&[[-1.0]]);
        assert_eq!(CholeskyDecomposition::new(&a).unwrap_err(), Conflict::NotPositiveDefinite{ column : 0 }.into());
    }

    #[test]
    fn nan_diagonal() {
        let a = Matrix::from_array(&[[f64::NAN, 0.0],
                                     [0.0,      1.0]]);
        assert_eq!(CholeskyDecomposition::new(&a).unwrap_err(), Conflict::NotPositiveDefinite{ column : 0 }.into());
    }

    #[test]
    fn clone_stays_read_only() {
        let a = Matrix::from_array(&[[4.0, 2.0],[2.0, 3.0]]);
        let chol = CholeskyDecomposition::new(&a).unwrap().clone();
        assert!(chol.matrix().is_read_only());
        assert!(chol.l().is_read_only());
        assert_eq!(chol.matrix(), &a);
    }

    #[test]
    fn solve() {
        let a = Matrix::from_array(&[[4.0, 2.0],[2.0, 3.0]]);
        let b = Matrix::from_array(&[[2.0],[1.0]]);
        let x = CholeskyDecomposition::new(&a).unwrap().solve(&b).unwrap();
        assert!(x.approx_eq(&Matrix::from_array(&[[0.5],[0.0]]), EPSILON));
    }
}
