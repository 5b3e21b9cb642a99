use crate::Matrix;

/// Return a new `columns × rows` matrix with element `(c,r)` equal to `m[(r,c)]`.
pub fn transpose(m : &Matrix) -> Matrix {
    Matrix::from_fn(m.columns(), m.rows(), |r,c| m.at(c, r))
}
