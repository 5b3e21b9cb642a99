use crate::{Matrix, EPSILON};

/// Number of linearly independent columns (equivalently rows).
///
/// Each column is scanned for an entry larger than [EPSILON] in a row that has not been used as
/// a pivot yet. If one is found the rank grows by one, the row is marked as used and the column
/// is eliminated from the remaining columns of all other rows.
pub fn rank(m : &Matrix) -> usize {
    let (rows,cols) = (m.rows(), m.columns());
    let mut a = m.data().to_vec();
    let mut used = vec![false; rows];
    let mut rank = 0;

    for c in 0..cols {
        let Some(j) = (0..rows).find(|&r| ! used[r] && a[r*cols + c].abs() > EPSILON) else { continue };
        rank += 1;
        used[j] = true;

        let pivot = a[j*cols + c];
        for p in c+1..cols {
            a[j*cols + p] /= pivot;
        }
        for k in (0..rows).filter(|&k| k != j) {
            let f = a[k*cols + c];
            if f.abs() > EPSILON {
                for p in c+1..cols {
                    a[k*cols + p] -= a[j*cols + p] * f;
                }
            }
        }
    }

    rank
}
