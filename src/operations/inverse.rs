use log::debug;

use crate::{Conflict, Matrix, Result, EPSILON};

/// Inverse of a square matrix by Gauss-Jordan elimination of the augmented matrix `[A | I]`.
///
/// Each column selects the remaining entry of largest magnitude as pivot, swaps it into place,
/// normalizes the pivot row and eliminates the column from every other row. When the left half
/// has been reduced to the identity the right half holds the inverse.
///
/// # Errors
/// - [Conflict::NotSquare] if the matrix is not square.
/// - [Conflict::Singular] if the largest available pivot is smaller than [EPSILON] in magnitude.
pub fn inverse(m : &Matrix) -> Result<Matrix> {
    m.check_square()?;
    let n = m.rows();
    let w = 2*n;

    let mut a = vec![0.0; n*w];
    for (r,row) in a.chunks_mut(w).enumerate() {
        row[..n].copy_from_slice(&m.data()[r*n..(r+1)*n]);
        row[n+r] = 1.0;
    }

    for c in 0..n {
        let (index,pivot) = (c..n)
            .map(|r| (r,a[r*w + c]))
            .fold((c,0.0f64), |(i,p),(r,v)| if v.abs() > p.abs() { (r,v) } else { (i,p) });

        if pivot.abs() < EPSILON {
            debug!("inverse: pivot {:e} in column {} below tolerance", pivot, c);
            return Err(Conflict::Singular.into());
        }

        // swap the pivot row into place and normalize it
        for cc in 0..w {
            let v = a[index*w + cc] / pivot;
            a[index*w + cc] = a[c*w + cc];
            a[c*w + cc] = v;
        }

        for r in (0..n).filter(|&r| r != c) {
            let f = a[r*w + c];
            if f != 0.0 {
                for cc in 0..w {
                    a[r*w + cc] -= a[c*w + cc] * f;
                }
            }
        }
    }

    Ok(Matrix::from_parts(n, n, a.chunks(w).flat_map(|row| row[n..].iter().cloned()).collect()))
}
