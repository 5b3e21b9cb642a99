use log::debug;

use crate::{Matrix, Result, EPSILON};

/// Determinant of a square matrix by Gaussian elimination with partial pivoting.
///
/// In each column the remaining entry of largest magnitude is swapped into the pivot position,
/// and every swap flips the sign. If a pivot is smaller than [EPSILON] in magnitude the
/// determinant is zero. A result smaller than [EPSILON] in magnitude is returned as exactly zero.
///
/// # Errors
/// [crate::Conflict::NotSquare] if the matrix is not square.
pub fn determinant(m : &Matrix) -> Result<f64> {
    m.check_square()?;
    let n = m.rows();
    let mut a = m.data().to_vec();
    let mut swaps = 0usize;

    for c in 0..n-1 {
        let (index,pivot) = (c..n)
            .map(|r| (r,a[r*n + c]))
            .fold((c,0.0f64), |(i,p),(r,v)| if v.abs() > p.abs() { (r,v) } else { (i,p) });

        if pivot.abs() < EPSILON {
            debug!("determinant: pivot {:e} in column {} below tolerance", pivot, c);
            return Ok(0.0);
        }
        if index != c {
            swaps += 1;
            for cc in 0..n {
                a.swap(index*n + cc, c*n + cc);
            }
        }

        for r in c+1..n {
            let f = a[r*n + c] / pivot;
            for cc in 0..n {
                a[r*n + cc] -= f * a[c*n + cc];
            }
        }
    }

    let det = (0..n).map(|i| a[i*n + i]).product::<f64>() * if swaps % 2 == 0 { 1.0 } else { -1.0 };
    Ok(if det.abs() > EPSILON { det } else { 0.0 })
}
