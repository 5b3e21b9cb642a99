//! Arithmetic operators for [Matrix].
//!
//! Operations between two matrices check dimensions first and return [Result]; operations with a
//! scalar cannot fail and return a [Matrix]. Every operator allocates a new result and leaves its
//! operands untouched. Each operator is implemented for borrowed operands and forwarded for owned
//! ones.

use std::ops::{Add, Div, Mul, Neg, Sub};

use super::Matrix;
use crate::error::Result;

impl Add<&Matrix> for &Matrix {
    type Output = Result<Matrix>;
    fn add(self, rhs : &Matrix) -> Result<Matrix> {
        self.zip_map(rhs, |a,b| a+b)
    }
}

impl Sub<&Matrix> for &Matrix {
    type Output = Result<Matrix>;
    /// Defined as `self + rhs·(-1)`.
    fn sub(self, rhs : &Matrix) -> Result<Matrix> {
        self + &(rhs * -1.0)
    }
}

impl Mul<&Matrix> for &Matrix {
    type Output = Result<Matrix>;
    fn mul(self, rhs : &Matrix) -> Result<Matrix> {
        self.matmul(rhs)
    }
}

impl Add<f64> for &Matrix {
    type Output = Matrix;
    fn add(self, rhs : f64) -> Matrix {
        self.map(|v| v+rhs)
    }
}

impl Sub<f64> for &Matrix {
    type Output = Matrix;
    fn sub(self, rhs : f64) -> Matrix {
        self + (-1.0 * rhs)
    }
}

impl Mul<f64> for &Matrix {
    type Output = Matrix;
    fn mul(self, rhs : f64) -> Matrix {
        self.map(|v| v*rhs)
    }
}

impl Div<f64> for &Matrix {
    type Output = Matrix;
    /// Defined as `self · (1/rhs)`.
    fn div(self, rhs : f64) -> Matrix {
        self * (1.0 / rhs)
    }
}

impl Neg for &Matrix {
    type Output = Matrix;
    fn neg(self) -> Matrix {
        self * -1.0
    }
}

impl Neg for Matrix {
    type Output = Matrix;
    fn neg(self) -> Matrix {
        -&self
    }
}

/// Forward a matrix/matrix operator to the `&Matrix op &Matrix` implementation.
macro_rules! forward_matrix_op {
    ($tr:ident, $f:ident) => {
        impl $tr<Matrix> for Matrix {
            type Output = Result<Matrix>;
            fn $f(self, rhs : Matrix) -> Result<Matrix> { (&self).$f(&rhs) }
        }
        impl $tr<&Matrix> for Matrix {
            type Output = Result<Matrix>;
            fn $f(self, rhs : &Matrix) -> Result<Matrix> { (&self).$f(rhs) }
        }
        impl $tr<Matrix> for &Matrix {
            type Output = Result<Matrix>;
            fn $f(self, rhs : Matrix) -> Result<Matrix> { self.$f(&rhs) }
        }
    }
}

/// Forward a matrix/scalar operator to the `&Matrix op f64` implementation.
macro_rules! forward_scalar_op {
    ($tr:ident, $f:ident) => {
        impl $tr<f64> for Matrix {
            type Output = Matrix;
            fn $f(self, rhs : f64) -> Matrix { (&self).$f(rhs) }
        }
    }
}

/// Scalar on the left. Only the commutative operators are provided.
macro_rules! commute_scalar_op {
    ($tr:ident, $f:ident) => {
        impl $tr<&Matrix> for f64 {
            type Output = Matrix;
            fn $f(self, rhs : &Matrix) -> Matrix { rhs.$f(self) }
        }
        impl $tr<Matrix> for f64 {
            type Output = Matrix;
            fn $f(self, rhs : Matrix) -> Matrix { (&rhs).$f(self) }
        }
    }
}

forward_matrix_op!(Add, add);
forward_matrix_op!(Sub, sub);
forward_matrix_op!(Mul, mul);

forward_scalar_op!(Add, add);
forward_scalar_op!(Sub, sub);
forward_scalar_op!(Mul, mul);
forward_scalar_op!(Div, div);

commute_scalar_op!(Add, add);
commute_scalar_op!(Mul, mul);
