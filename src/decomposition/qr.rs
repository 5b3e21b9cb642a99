//! QR decomposition by Householder reflections.
//!
//! An `m × n` matrix is factorized as `A = Q·R` with `Q` of size `m × n` and upper triangular `R`
//! of size `n × n`. For `m >= n` the columns of `Q` are orthonormal. For `m < n` only the first
//! `m` columns of `Q` and the first `m` rows of `R` are non-zero, and the matrix is never full
//! rank.
//!
//! The reflections are kept in packed form: column `k` of `qr` on and below the diagonal holds
//! the Householder vector of step `k`, while the entries above the diagonal belong to `R`. The
//! diagonal of `R` is kept separately in `rdiag`.

use std::cell::OnceCell;

use log::{debug, trace};

use super::{check_rhs, Decomposition};
use crate::{Conflict, Matrix, Result, EPSILON};

/// Householder QR factorization of a rectangular matrix.
#[derive(Debug)]
pub struct QrDecomposition {
    matrix : Matrix,
    /// Packed reflections and strict upper triangle of `R`, `m × n` row-major.
    qr     : Vec<f64>,
    rdiag  : Vec<f64>,
    q      : OnceCell<Matrix>,
    r      : OnceCell<Matrix>,
}

/// `sqrt(a² + b²)` computed without intermediate overflow or underflow. Returns zero when both
/// values are at most [EPSILON] in magnitude.
fn hypot(a : f64, b : f64) -> f64 {
    if a.abs() > b.abs() {
        let r = b / a;
        a.abs() * (1.0 + r*r).sqrt()
    }
    else if b.abs() > EPSILON {
        let r = a / b;
        b.abs() * (1.0 + r*r).sqrt()
    }
    else {
        0.0
    }
}

impl QrDecomposition {
    /// Factorize `matrix`. Any shape is accepted.
    ///
    /// For each column `k` the norm of the sub-column `A[k.., k]` is computed. A zero norm marks a
    /// rank deficient column which is left untouched with a zero diagonal entry in `R`. Otherwise
    /// the sub-column is scaled by the norm, signed so that the pivot becomes positive, turned into
    /// the reflection vector, and the reflection is applied to the remaining columns.
    pub fn new(matrix : &Matrix) -> Result<QrDecomposition> {
        let matrix = matrix.as_read_only();
        let (m,n) = (matrix.rows(), matrix.columns());
        trace!("qr: factorizing {}x{} matrix", m, n);

        let mut qr = matrix.data().to_vec();
        let mut rdiag = vec![0.0; n];

        for k in 0..n {
            let mut nrm = (k..m).fold(0.0, |acc,i| hypot(acc, qr[i*n + k]));

            if nrm != 0.0 {
                if qr[k*n + k] < 0.0 {
                    nrm = -nrm;
                }
                for i in k..m {
                    qr[i*n + k] /= nrm;
                }
                qr[k*n + k] += 1.0;

                for j in k+1..n {
                    let s : f64 = (k..m).map(|i| qr[i*n + k] * qr[i*n + j]).sum();
                    let s = -s / qr[k*n + k];
                    for i in k..m {
                        qr[i*n + j] += s * qr[i*n + k];
                    }
                }
            }
            else {
                debug!("qr: column {} is rank deficient", k);
            }
            rdiag[k] = -nrm;
        }

        Ok(QrDecomposition{ matrix, qr, rdiag, q : OnceCell::new(), r : OnceCell::new() })
    }

    fn shape(&self) -> (usize,usize) { (self.matrix.rows(), self.matrix.columns()) }

    /// True if every diagonal entry of `R` exceeds [EPSILON] in magnitude.
    pub fn is_full_rank(&self) -> bool {
        self.rdiag.iter().all(|d| d.abs() > EPSILON)
    }

    /// The `m × n` factor `Q`, formed on first access by applying the stored reflections to the
    /// leading columns of the identity.
    pub fn q(&self) -> &Matrix {
        self.q.get_or_init(|| {
            let (m,n) = self.shape();
            let qr = &self.qr;
            let mut q = vec![0.0; m*n];
            for k in (0..n.min(m)).rev() {
                q[k*n + k] = 1.0;
                if qr[k*n + k] != 0.0 {
                    for j in k..n {
                        let s : f64 = (k..m).map(|i| qr[i*n + k] * q[i*n + j]).sum();
                        let s = -s / qr[k*n + k];
                        for i in k..m {
                            q[i*n + j] += s * qr[i*n + k];
                        }
                    }
                }
            }
            Matrix::from_parts(m, n, q).into_read_only()
        })
    }

    /// The `n × n` upper triangular factor `R`.
    pub fn r(&self) -> &Matrix {
        self.r.get_or_init(|| {
            let (m,n) = self.shape();
            Matrix::from_fn(n, n, |i,j| {
                if i == j { self.rdiag[i] }
                else if i < j && i < m { self.qr[i*n + j] }
                else { 0.0 }
            }).into_read_only()
        })
    }
}

/// Copy a formed factor, keeping it read-only. An empty cell stays empty.
fn clone_factor(cell : &OnceCell<Matrix>) -> OnceCell<Matrix> {
    cell.get().map(|m| OnceCell::from(m.as_read_only())).unwrap_or_default()
}

impl Clone for QrDecomposition {
    /// The copy keeps the decomposed matrix and any formed factor read-only.
    fn clone(&self) -> QrDecomposition {
        QrDecomposition{
            matrix : self.matrix.as_read_only(),
            qr     : self.qr.clone(),
            rdiag  : self.rdiag.clone(),
            q      : clone_factor(&self.q),
            r      : clone_factor(&self.r),
        }
    }
}

impl Decomposition for QrDecomposition {
    fn matrix(&self) -> &Matrix { &self.matrix }

    /// Solve `A·x = b` in the least squares sense. The reflections are applied to `b` to form
    /// `Qᵀ·b`, then `R·x = Qᵀ·b` is solved by backward substitution. The result has `n` rows; for a
    /// square matrix it is the exact solution.
    ///
    /// # Errors
    /// In addition to the right-hand side checks, [Conflict::RankDeficient] if the matrix is not
    /// full rank.
    fn solve(&self, b : &Matrix) -> Result<Matrix> {
        let (m,n) = self.shape();
        check_rhs(b, m)?;
        if ! self.is_full_rank() {
            return Err(Conflict::RankDeficient.into());
        }
        let qr = &self.qr;
        let mut x = b.data().to_vec();

        for k in 0..n {
            let s : f64 = (k..m).map(|i| qr[i*n + k] * x[i]).sum();
            let s = -s / qr[k*n + k];
            for i in k..m {
                x[i] += s * qr[i*n + k];
            }
        }

        for k in (0..n).rev() {
            x[k] /= self.rdiag[k];
            for i in 0..k {
                x[i] -= x[k] * qr[i*n + k];
            }
        }

        x.truncate(n);
        Ok(Matrix::from_parts(n, 1, x))
    }
}
