//! The dense [Matrix] type.
//!
//! A [Matrix] owns a row-major array of `rows × columns` values whose size is fixed at
//! construction. Every constructor, [Matrix::clone] and [Matrix::as_read_only] performs a deep
//! copy, so no two matrices ever share storage.
//!
//! Trace, determinant, rank, transpose and inverse are computed on first request and cached.
//! All mutation goes through `&mut self` entry points ([Matrix::set], [Matrix::set_submatrix],
//! [Matrix::set_row], [Matrix::set_column]) which reject read-only matrices and clear the cache.

mod ops;

use std::cell::OnceCell;
use std::fmt;

use itertools::{iproduct, izip, Itertools};

use crate::error::{Conflict, MatrixError, Result};
use crate::operations;
use crate::EPSILON;

/// Lazily computed derived values. A cell is either empty or holds the value for the current
/// contents of the matrix.
#[derive(Default)]
struct Cache {
    trace     : OnceCell<f64>,
    det       : OnceCell<f64>,
    rank      : OnceCell<usize>,
    transpose : OnceCell<Box<Matrix>>,
    inverse   : OnceCell<Box<Matrix>>,
}

/// A dense matrix of `f64` values stored in row-major order.
///
/// Element `(r,c)` is stored at `data[r*columns + c]`. Both dimensions are at least 1.
pub struct Matrix {
    rows      : usize,
    columns   : usize,
    data      : Vec<f64>,
    read_only : bool,
    cache     : Cache,
}

impl Matrix {
    ///////////////////////////////////////////////////////////////////////////
    // Construction

    /// Create a `rows × columns` matrix filled with zeros.
    pub fn new(rows : usize, columns : usize) -> Result<Matrix> {
        Matrix::with_value(rows, columns, 0.0)
    }

    /// Create a `rows × columns` matrix with every element set to `value`.
    ///
    /// # Errors
    /// [MatrixError::OutOfRange] naming `rows` or `columns` if either is zero.
    pub fn with_value(rows : usize, columns : usize, value : f64) -> Result<Matrix> {
        if rows < 1 {
            Err(MatrixError::out_of_range("rows", "greater than zero"))
        }
        else if columns < 1 {
            Err(MatrixError::out_of_range("columns", "greater than zero"))
        }
        else {
            Ok(Matrix::from_parts(rows, columns, vec![value; rows*columns]))
        }
    }

    /// Create a `dimension × dimension` matrix filled with zeros.
    pub fn square(dimension : usize) -> Result<Matrix> {
        Matrix::square_with(dimension, 0.0)
    }

    /// Create a `dimension × dimension` matrix with every element set to `value`.
    pub fn square_with(dimension : usize, value : f64) -> Result<Matrix> {
        if dimension < 1 {
            Err(MatrixError::out_of_range("dimension", "greater than zero"))
        }
        else {
            Matrix::with_value(dimension, dimension, value)
        }
    }

    /// Create the `dimension × dimension` identity matrix.
    pub fn identity(dimension : usize) -> Result<Matrix> {
        let mut m = Matrix::square(dimension)?;
        for i in 0..dimension {
            m.data[i*dimension + i] = 1.0;
        }
        Ok(m)
    }

    /// Create a matrix from a fixed size two-dimensional array.
    ///
    /// # Panics
    /// If `R` or `C` is zero.
    pub fn from_array<const R : usize, const C : usize>(data : &[[f64; C]; R]) -> Matrix {
        assert!(R > 0 && C > 0, "matrix dimensions must be greater than zero");
        Matrix::from_parts(R, C, data.iter().flatten().cloned().collect())
    }

    /// Create a matrix from a list of rows. The data is copied.
    ///
    /// # Errors
    /// - [MatrixError::OutOfRange] naming `rows` or `columns` if there are no rows or the rows are
    ///   empty.
    /// - [MatrixError::ShapeMismatch] naming `data` if the rows have different lengths.
    pub fn from_rows<R>(data : &[R]) -> Result<Matrix> where R : AsRef<[f64]> {
        let rows = data.len();
        if rows < 1 {
            return Err(MatrixError::out_of_range("rows", "greater than zero"));
        }
        let columns = data[0].as_ref().len();
        if columns < 1 {
            return Err(MatrixError::out_of_range("columns", "greater than zero"));
        }
        if let Some(i) = data.iter().position(|r| r.as_ref().len() != columns) {
            return Err(MatrixError::shape("data", format!("row {} has {} columns, expected {}", i, data[i].as_ref().len(), columns)));
        }
        Ok(Matrix::from_parts(rows, columns, data.iter().flat_map(|r| r.as_ref().iter().cloned()).collect()))
    }

    /// Create a matrix from row-major data.
    ///
    /// # Errors
    /// - [MatrixError::OutOfRange] if one of the dimensions is zero.
    /// - [MatrixError::ShapeMismatch] naming `data` if `data.len() != rows*columns`.
    pub fn from_row_major(rows : usize, columns : usize, data : Vec<f64>) -> Result<Matrix> {
        if rows < 1 {
            Err(MatrixError::out_of_range("rows", "greater than zero"))
        }
        else if columns < 1 {
            Err(MatrixError::out_of_range("columns", "greater than zero"))
        }
        else if data.len() != rows*columns {
            Err(MatrixError::shape("data", format!("expected {} elements, got {}", rows*columns, data.len())))
        }
        else {
            Ok(Matrix::from_parts(rows, columns, data))
        }
    }

    /// Build a matrix from trusted parts. The caller guarantees the dimensions are positive and
    /// match the data length.
    pub(crate) fn from_parts(rows : usize, columns : usize, data : Vec<f64>) -> Matrix {
        debug_assert!(rows > 0 && columns > 0 && data.len() == rows*columns);
        Matrix{ rows, columns, data, read_only : false, cache : Cache::default() }
    }

    /// Build a matrix of the given shape where element `(r,c)` is `f(r,c)`.
    pub(crate) fn from_fn<F>(rows : usize, columns : usize, f : F) -> Matrix where F : Fn(usize,usize) -> f64 {
        Matrix::from_parts(rows, columns, iproduct!(0..rows, 0..columns).map(|(r,c)| f(r,c)).collect())
    }

    /// Consume the matrix and return it with the read-only flag set.
    pub(crate) fn into_read_only(mut self) -> Matrix {
        self.read_only = true;
        self
    }

    ///////////////////////////////////////////////////////////////////////////
    // Shape

    /// Number of rows.
    pub fn rows(&self) -> usize { self.rows }
    /// Number of columns.
    pub fn columns(&self) -> usize { self.columns }
    /// Shape as `[rows, columns]`.
    pub fn shape(&self) -> [usize; 2] { [self.rows, self.columns] }
    /// The elements in row-major order.
    pub fn data(&self) -> &[f64] { self.data.as_slice() }
    /// True if the matrix rejects modifications.
    pub fn is_read_only(&self) -> bool { self.read_only }
    /// True if the number of rows equals the number of columns.
    pub fn is_square(&self) -> bool { self.rows == self.columns }

    ///////////////////////////////////////////////////////////////////////////
    // Element access

    /// Unchecked read used by the numerical kernels, which iterate within known bounds.
    #[inline]
    pub(crate) fn at(&self, r : usize, c : usize) -> f64 {
        debug_assert!(r < self.rows && c < self.columns);
        self.data[r*self.columns + c]
    }

    fn check_row(&self, row : usize, param : &'static str) -> Result<()> {
        if row >= self.rows { Err(MatrixError::out_of_range(param, "[0, rows)")) } else { Ok(()) }
    }

    fn check_column(&self, column : usize, param : &'static str) -> Result<()> {
        if column >= self.columns { Err(MatrixError::out_of_range(param, "[0, columns)")) } else { Ok(()) }
    }

    fn check_writable(&self) -> Result<()> {
        if self.read_only { Err(Conflict::ReadOnly.into()) } else { Ok(()) }
    }

    pub(crate) fn check_square(&self) -> Result<()> {
        if self.is_square() {
            Ok(())
        }
        else {
            Err(Conflict::NotSquare{ rows : self.rows, columns : self.columns }.into())
        }
    }

    /// Validate a block `[start_row, end_row] × [start_col, end_col]`. The first violated bound is
    /// reported: a start bound past its end bound names the start bound.
    fn check_block(&self, start_row : usize, start_col : usize, end_row : usize, end_col : usize) -> Result<()> {
        if start_row > end_row {
            Err(MatrixError::out_of_range("start_row", "[0, end_row]"))
        }
        else if end_row >= self.rows {
            Err(MatrixError::out_of_range("end_row", "[0, rows)"))
        }
        else if start_col > end_col {
            Err(MatrixError::out_of_range("start_col", "[0, end_col]"))
        }
        else if end_col >= self.columns {
            Err(MatrixError::out_of_range("end_col", "[0, columns)"))
        }
        else {
            Ok(())
        }
    }

    /// Forget all cached derived values. Called by every modifying method.
    fn invalidate(& mut self) {
        self.cache = Cache::default();
    }

    /// Get element `(row,column)`.
    ///
    /// # Errors
    /// [MatrixError::OutOfRange] naming `row` or `column`.
    pub fn get(&self, row : usize, column : usize) -> Result<f64> {
        self.check_row(row, "row")?;
        self.check_column(column, "column")?;
        Ok(self.at(row, column))
    }

    /// Set element `(row,column)` to `value`.
    ///
    /// # Errors
    /// - [Conflict::ReadOnly] if the matrix is read-only.
    /// - [MatrixError::OutOfRange] naming `row` or `column`.
    pub fn set(& mut self, row : usize, column : usize, value : f64) -> Result<()> {
        self.check_writable()?;
        self.check_row(row, "row")?;
        self.check_column(column, "column")?;
        self.data[row*self.columns + column] = value;
        self.invalidate();
        Ok(())
    }

    /// Return a copy of the block spanning rows `start_row..=end_row` and columns
    /// `start_col..=end_col`.
    pub fn submatrix(&self, start_row : usize, start_col : usize, end_row : usize, end_col : usize) -> Result<Matrix> {
        self.check_block(start_row, start_col, end_row, end_col)?;
        Ok(Matrix::from_fn(end_row-start_row+1, end_col-start_col+1, |r,c| self.at(start_row+r, start_col+c)))
    }

    /// Overwrite the block spanning rows `start_row..=end_row` and columns `start_col..=end_col`
    /// with the values of `matrix`, which must have exactly the shape of the block.
    ///
    /// # Errors
    /// - [Conflict::ReadOnly] if the matrix is read-only.
    /// - [MatrixError::OutOfRange] naming the first invalid bound.
    /// - [MatrixError::ShapeMismatch] naming `matrix` if its shape differs from the block.
    pub fn set_submatrix(& mut self, start_row : usize, start_col : usize, end_row : usize, end_col : usize, matrix : &Matrix) -> Result<()> {
        self.check_writable()?;
        self.check_block(start_row, start_col, end_row, end_col)?;
        let shape = [end_row-start_row+1, end_col-start_col+1];
        if matrix.shape() != shape {
            return Err(MatrixError::shape("matrix", format!("expected shape {:?}, got {:?}", shape, matrix.shape())));
        }
        for (r,c) in iproduct!(0..shape[0], 0..shape[1]) {
            self.data[(start_row+r)*self.columns + start_col+c] = matrix.at(r, c);
        }
        self.invalidate();
        Ok(())
    }

    /// Return row `row` as a `1 × columns` matrix.
    pub fn row(&self, row : usize) -> Result<Matrix> {
        self.check_row(row, "row")?;
        Ok(Matrix::from_parts(1, self.columns, self.data[row*self.columns..(row+1)*self.columns].to_vec()))
    }

    /// Overwrite row `row` with `vector`, which must be `1 × columns`.
    pub fn set_row(& mut self, row : usize, vector : &Matrix) -> Result<()> {
        self.check_writable()?;
        self.check_row(row, "row")?;
        if vector.rows != 1 {
            return Err(MatrixError::shape("vector", "must have exactly one row"));
        }
        if vector.columns != self.columns {
            return Err(MatrixError::shape("vector", format!("must have {} columns, got {}", self.columns, vector.columns)));
        }
        self.data[row*self.columns..(row+1)*self.columns].copy_from_slice(vector.data());
        self.invalidate();
        Ok(())
    }

    /// Return column `column` as a `rows × 1` matrix.
    pub fn column(&self, column : usize) -> Result<Matrix> {
        self.check_column(column, "column")?;
        Ok(Matrix::from_parts(self.rows, 1, self.data[column..].iter().step_by(self.columns).cloned().collect()))
    }

    /// Overwrite column `column` with `vector`, which must be `rows × 1`.
    pub fn set_column(& mut self, column : usize, vector : &Matrix) -> Result<()> {
        self.check_writable()?;
        self.check_column(column, "column")?;
        if vector.columns != 1 {
            return Err(MatrixError::shape("vector", "must have exactly one column"));
        }
        if vector.rows != self.rows {
            return Err(MatrixError::shape("vector", format!("must have {} rows, got {}", self.rows, vector.rows)));
        }
        for (t,&v) in izip!(self.data[column..].iter_mut().step_by(self.columns), vector.data.iter()) {
            *t = v;
        }
        self.invalidate();
        Ok(())
    }

    /// Sum of the elements in row `row`.
    pub fn sum_row(&self, row : usize) -> Result<f64> {
        self.check_row(row, "row")?;
        Ok(self.data[row*self.columns..(row+1)*self.columns].iter().sum())
    }

    /// Sum of the elements in column `column`.
    pub fn sum_column(&self, column : usize) -> Result<f64> {
        self.check_column(column, "column")?;
        Ok(self.data[column..].iter().step_by(self.columns).sum())
    }

    ///////////////////////////////////////////////////////////////////////////
    // Copies

    /// Return an independent deep copy that rejects every modification.
    pub fn as_read_only(&self) -> Matrix {
        self.clone().into_read_only()
    }

    /// Return a new `rows × columns` matrix holding the overlapping top-left block of this
    /// matrix, zero-filled elsewhere.
    ///
    /// # Errors
    /// [MatrixError::OutOfRange] naming `rows` or `columns` if either is zero.
    pub fn resize(&self, rows : usize, columns : usize) -> Result<Matrix> {
        if rows < 1 {
            return Err(MatrixError::out_of_range("rows", "greater than zero"));
        }
        if columns < 1 {
            return Err(MatrixError::out_of_range("columns", "greater than zero"));
        }
        Ok(Matrix::from_fn(rows, columns, |r,c| if r < self.rows && c < self.columns { self.at(r, c) } else { 0.0 }))
    }

    /// Return the values as a vector of rows.
    pub fn to_array(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.columns).map(|r| r.to_vec()).collect()
    }

    ///////////////////////////////////////////////////////////////////////////
    // Arithmetic

    /// Compute the `n`-th power by repeated squaring. `pow(0)` is the identity.
    ///
    /// # Errors
    /// [Conflict::NotSquare] if the matrix is not square.
    pub fn pow(&self, n : u32) -> Result<Matrix> {
        self.check_square()?;
        exp_by_squaring(self, n)
    }

    /// Element-wise (Hadamard) product.
    ///
    /// # Errors
    /// [Conflict::DimensionMismatch] if the shapes differ.
    pub fn times(&self, other : &Matrix) -> Result<Matrix> {
        self.check_same_shape(other)?;
        Ok(Matrix::from_parts(self.rows, self.columns, izip!(self.data.iter(), other.data.iter()).map(|(a,b)| a*b).collect()))
    }

    pub(crate) fn check_same_shape(&self, other : &Matrix) -> Result<()> {
        if self.shape() != other.shape() {
            Err(Conflict::DimensionMismatch{ lhs : self.shape(), rhs : other.shape() }.into())
        }
        else {
            Ok(())
        }
    }

    /// Matrix product `self · other`.
    ///
    /// # Errors
    /// [Conflict::DimensionMismatch] if `self.columns() != other.rows()`.
    pub fn matmul(&self, other : &Matrix) -> Result<Matrix> {
        if self.columns != other.rows {
            return Err(Conflict::DimensionMismatch{ lhs : self.shape(), rhs : other.shape() }.into());
        }
        let mut data = vec![0.0; self.rows*other.columns];
        for (lrow,rrow) in izip!(self.data.chunks(self.columns), data.chunks_mut(other.columns)) {
            for (&a,orow) in izip!(lrow.iter(), other.data.chunks(other.columns)) {
                rrow.iter_mut().zip(orow.iter()).for_each(|(t,&b)| *t += a*b);
            }
        }
        Ok(Matrix::from_parts(self.rows, other.columns, data))
    }

    /// Return a new matrix where each element is `f` applied to the corresponding element.
    pub fn map<F>(&self, f : F) -> Matrix where F : Fn(f64) -> f64 {
        Matrix::from_parts(self.rows, self.columns, self.data.iter().map(|&v| f(v)).collect())
    }

    pub(crate) fn zip_map<F>(&self, other : &Matrix, f : F) -> Result<Matrix> where F : Fn(f64,f64) -> f64 {
        self.check_same_shape(other)?;
        Ok(Matrix::from_parts(self.rows, self.columns, izip!(self.data.iter(), other.data.iter()).map(|(&a,&b)| f(a,b)).collect()))
    }

    ///////////////////////////////////////////////////////////////////////////
    // Predicates

    /// True if `|a[i,j] - a[j,i]| <= EPSILON` for all `i,j`. A non-square matrix is not symmetric.
    pub fn is_symmetric(&self) -> bool { self.is_symmetric_within(EPSILON) }

    /// Like [Matrix::is_symmetric] with an explicit tolerance.
    pub fn is_symmetric_within(&self, tol : f64) -> bool {
        self.is_square() &&
            iproduct!(0..self.rows, 0..self.columns)
                .filter(|(i,j)| i < j)
                .all(|(i,j)| (self.at(i, j) - self.at(j, i)).abs() <= tol)
    }

    /// True if every element satisfies `|a[i,j]| <= EPSILON`.
    pub fn is_zero(&self) -> bool { self.is_zero_within(EPSILON) }

    /// Like [Matrix::is_zero] with an explicit tolerance.
    pub fn is_zero_within(&self, tol : f64) -> bool {
        self.data.iter().all(|v| v.abs() <= tol)
    }

    /// True if any element is NaN.
    pub fn is_nan(&self) -> bool {
        self.data.iter().any(|v| v.is_nan())
    }

    /// True if both matrices have the same shape and all elements differ by at most `tol`.
    pub fn approx_eq(&self, other : &Matrix, tol : f64) -> bool {
        self.shape() == other.shape() &&
            izip!(self.data.iter(), other.data.iter()).all(|(a,b)| (a-b).abs() <= tol)
    }

    ///////////////////////////////////////////////////////////////////////////
    // Cached properties

    /// Sum of the diagonal.
    ///
    /// # Errors
    /// [Conflict::NotSquare] if the matrix is not square.
    pub fn trace(&self) -> Result<f64> {
        cached(&self.cache.trace, || operations::trace(self)).copied()
    }

    /// Determinant computed by Gaussian elimination with partial pivoting.
    ///
    /// # Errors
    /// [Conflict::NotSquare] if the matrix is not square.
    pub fn determinant(&self) -> Result<f64> {
        cached(&self.cache.det, || operations::determinant(self)).copied()
    }

    /// Number of linearly independent columns.
    pub fn rank(&self) -> usize {
        *self.cache.rank.get_or_init(|| operations::rank(self))
    }

    /// The transposed matrix.
    pub fn transpose(&self) -> &Matrix {
        self.cache.transpose.get_or_init(|| Box::new(operations::transpose(self).into_read_only()))
    }

    /// The inverse matrix computed by Gauss-Jordan elimination.
    ///
    /// # Errors
    /// - [Conflict::NotSquare] if the matrix is not square.
    /// - [Conflict::Singular] if a pivot smaller than [EPSILON] is met.
    pub fn inverse(&self) -> Result<&Matrix> {
        cached(&self.cache.inverse, || operations::inverse(self).map(|m| Box::new(m.into_read_only()))).map(|b| &**b)
    }
}

/// Return the value of `cell`, computing and storing it first if the cell is empty. Failures
/// are returned without touching the cell.
fn cached<'a,T,F>(cell : &'a OnceCell<T>, f : F) -> Result<&'a T> where F : FnOnce() -> Result<T> {
    if let Some(v) = cell.get() {
        return Ok(v);
    }
    let v = f()?;
    Ok(cell.get_or_init(|| v))
}

fn exp_by_squaring(m : &Matrix, n : u32) -> Result<Matrix> {
    if n == 0 {
        return Matrix::identity(m.rows);
    }
    let pr = m.matmul(m)?;
    if n % 2 == 0 {
        exp_by_squaring(&pr, n/2)
    }
    else {
        m.matmul(&exp_by_squaring(&pr, (n-1)/2)?)
    }
}

///////////////////////////////////////////////////////////////////////////////

impl Clone for Matrix {
    /// Independent, writable deep copy. Cached values are not carried over.
    fn clone(&self) -> Matrix {
        Matrix::from_parts(self.rows, self.columns, self.data.clone())
    }
}

impl PartialEq for Matrix {
    /// Exact element-wise equality. The read-only flag is not compared.
    fn eq(&self, other : &Matrix) -> bool {
        self.shape() == other.shape() && self.data == other.data
    }
}

impl std::ops::Index<(usize,usize)> for Matrix {
    type Output = f64;
    /// # Panics
    /// If the index is out of bounds. Use [Matrix::get] for a checked read.
    fn index(&self, (r,c) : (usize,usize)) -> &f64 {
        assert!(r < self.rows && c < self.columns, "index ({},{}) out of bounds for {}x{} matrix", r, c, self.rows, self.columns);
        &self.data[r*self.columns + c]
    }
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f : & mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix")
            .field("shape", &self.shape())
            .field("read_only", &self.read_only)
            .field("data", &self.data)
            .finish()
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f : & mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(self.columns) {
            writeln!(f, "[{}]", row.iter().map(|v| format!("{:>10.4}", v)).join(", "))?;
        }
        Ok(())
    }
}

///////////////////////////////////////////////////////////////////////////////
// GLOBAL FUNCTIONS

/// Create a dense matrix from row-major data.
pub fn dense<D>(rows : usize, columns : usize, data : D) -> Result<Matrix> where D : Into<Vec<f64>> {
    Matrix::from_row_major(rows, columns, data.into())
}

/// Create a matrix of zeros.
pub fn zeros(rows : usize, columns : usize) -> Result<Matrix> {
    Matrix::new(rows, columns)
}

/// Create a matrix of ones.
pub fn ones(rows : usize, columns : usize) -> Result<Matrix> {
    Matrix::with_value(rows, columns, 1.0)
}

/// Create an identity matrix.
pub fn eye(dimension : usize) -> Result<Matrix> {
    Matrix::identity(dimension)
}

/// Create a square matrix with `data` on the diagonal.
pub fn diag<V>(data : V) -> Result<Matrix> where V : Into<Vec<f64>> {
    let data = data.into();
    let mut m = Matrix::square(data.len())?;
    let n = data.len();
    for (i,v) in data.into_iter().enumerate() {
        m.data[i*n + i] = v;
    }
    Ok(m)
}
