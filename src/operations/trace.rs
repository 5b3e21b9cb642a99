use crate::{Matrix, Result};

/// Sum of the diagonal elements of a square matrix.
///
/// # Errors
/// [crate::Conflict::NotSquare] if the matrix is not square.
pub fn trace(m : &Matrix) -> Result<f64> {
    m.check_square()?;
    Ok((0..m.rows()).map(|i| m.at(i, i)).sum())
}
