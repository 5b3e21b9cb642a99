//! LU decomposition without pivoting.
//!
//! A square matrix is factorized as `A = L·U` where `L` is unit lower triangular and `U` is
//! upper triangular. No rows are exchanged, so a zero or tiny leading pivot is not avoided: the
//! factors then contain large, infinite or NaN entries and [LuDecomposition::is_non_singular]
//! reports `false`. Solving with such a factorization fails with [Conflict::Singular].

use log::{debug, trace};

use super::{backward_by, check_rhs, forward_by, Decomposition, Diagonal};
use crate::{Conflict, Matrix, Result, EPSILON};

/// LU factorization of a square matrix.
#[derive(Debug)]
pub struct LuDecomposition {
    /// Read-only copy of the decomposed matrix.
    matrix : Matrix,
    /// Packed factors: `U` on and above the diagonal, `L` below it (its unit diagonal is
    /// implicit).
    lu     : Matrix,
    l      : Matrix,
    u      : Matrix,
}

impl LuDecomposition {
    /// Factorize `matrix`.
    ///
    /// Row `i` of `U` is computed as `U[i,j] = A[i,j] - Σ_{k<i} L[i,k]·U[k,j]` for `j >= i`,
    /// followed by column `i` of `L` as `L[j,i] = (A[j,i] - Σ_{k<i} L[j,k]·U[k,i]) / U[i,i]` for
    /// `j > i`.
    ///
    /// # Errors
    /// [Conflict::NotSquare] if the matrix is not square.
    pub fn new(matrix : &Matrix) -> Result<LuDecomposition> {
        matrix.check_square()?;
        let matrix = matrix.as_read_only();
        let n = matrix.rows();
        trace!("lu: factorizing {}x{} matrix", n, n);

        let mut lu = vec![0.0; n*n];
        for i in 0..n {
            for j in i..n {
                let s : f64 = (0..i).map(|k| lu[i*n + k] * lu[k*n + j]).sum();
                lu[i*n + j] = matrix.at(i, j) - s;
            }
            let pivot = lu[i*n + i];
            if pivot.abs() < EPSILON {
                debug!("lu: pivot {:e} in row {} below tolerance", pivot, i);
            }
            for j in i+1..n {
                let s : f64 = (0..i).map(|k| lu[j*n + k] * lu[k*n + i]).sum();
                lu[j*n + i] = (1.0 / pivot) * (matrix.at(j, i) - s);
            }
        }
        let lu = Matrix::from_parts(n, n, lu);

        let l = Matrix::from_fn(n, n, |i,j| if i > j { lu.at(i, j) } else if i == j { 1.0 } else { 0.0 }).into_read_only();
        let u = Matrix::from_fn(n, n, |i,j| if i <= j { lu.at(i, j) } else { 0.0 }).into_read_only();

        Ok(LuDecomposition{ matrix, lu : lu.into_read_only(), l, u })
    }

    /// The unit lower triangular factor.
    pub fn l(&self) -> &Matrix { &self.l }
    /// The upper triangular factor.
    pub fn u(&self) -> &Matrix { &self.u }

    /// True if every diagonal entry of `U` exceeds [EPSILON] in magnitude.
    pub fn is_non_singular(&self) -> bool {
        (0..self.lu.rows()).all(|j| self.lu.at(j, j).abs() > EPSILON)
    }

    /// Determinant of the matrix, the product of the diagonal of `U`.
    pub fn det(&self) -> f64 {
        (0..self.lu.rows()).map(|j| self.lu.at(j, j)).product()
    }
}

impl Clone for LuDecomposition {
    /// The copy keeps the decomposed matrix and the factors read-only.
    fn clone(&self) -> LuDecomposition {
        LuDecomposition{
            matrix : self.matrix.as_read_only(),
            lu     : self.lu.as_read_only(),
            l      : self.l.as_read_only(),
            u      : self.u.as_read_only(),
        }
    }
}

impl Decomposition for LuDecomposition {
    fn matrix(&self) -> &Matrix { &self.matrix }

    /// Solve `A·x = b` by forward substitution with `L` followed by backward substitution with
    /// `U`.
    ///
    /// # Errors
    /// In addition to the right-hand side checks, [Conflict::Singular] if the matrix is singular.
    fn solve(&self, b : &Matrix) -> Result<Matrix> {
        let n = self.lu.rows();
        check_rhs(b, n)?;
        if ! self.is_non_singular() {
            return Err(Conflict::Singular.into());
        }
        let lu = &self.lu;
        let y = forward_by(n, |i,j| lu.at(i, j), b.data(), Diagonal::Unit);
        Ok(backward_by(n, |i,j| lu.at(i, j), y.data()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn two_by_two() {
        let a = Matrix::from_array(&[[4.0, 3.0],
                                     [6.0, 3.0]]);
        let lu = LuDecomposition::new(&a).unwrap();
        assert_eq!(lu.l(), &Matrix::from_array(&[[1.0, 0.0],[1.5, 1.0]]));
        assert_eq!(lu.u(), &Matrix::from_array(&[[4.0, 3.0],[0.0, -1.5]]));
        assert_abs_diff_eq!(lu.det(), -6.0, epsilon = EPSILON);
        assert!(lu.is_non_singular());
        assert!(lu.l().is_read_only() && lu.u().is_read_only() && lu.matrix().is_read_only());
    }

    #[test]
    fn zero_leading_pivot() {
        let a = Matrix::from_array(&[[0.0, 1.0],
                                     [1.0, 0.0]]);
        let lu = LuDecomposition::new(&a).unwrap();
        assert!(! lu.is_non_singular());
        assert!(lu.l().is_nan() || lu.l().data().iter().any(|v| v.is_infinite()));
        assert_eq!(lu.solve(&Matrix::from_array(&[[1.0],[1.0]])), Err(Conflict::Singular.into()));
    }

    #[test]
    fn pivot_at_tolerance() {
        let lu = LuDecomposition::new(&Matrix::from_array(&[[EPSILON]])).unwrap();
        assert!(! lu.is_non_singular());
        let lu = LuDecomposition::new(&Matrix::from_array(&[[2.0*EPSILON]])).unwrap();
        assert!(lu.is_non_singular());
    }

    #[test]
    fn clone_stays_read_only() {
        let a = Matrix::from_array(&[[4.0, 3.0],
                                     [6.0, 3.0]]);
        let lu = LuDecomposition::new(&a).unwrap().clone();
        assert!(lu.matrix().is_read_only());
        assert!(lu.l().is_read_only() && lu.u().is_read_only());
        assert_eq!(lu.u(), &Matrix::from_array(&[[4.0, 3.0],[0.0, -1.5]]));
    }

    #[test]
    fn non_square() {
        let a = Matrix::new(2, 3).unwrap();
        assert_eq!(LuDecomposition::new(&a).unwrap_err(), Conflict::NotSquare{ rows : 2, columns : 3 }.into());
    }
}
