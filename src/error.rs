//! Error types for matrix operations and decompositions.
//!
//! Errors fall in three groups:
//! - [MatrixError::OutOfRange] an index or dimension argument is outside its valid domain.
//! - [MatrixError::InvalidOperation] the operation conflicts with the shape or a mathematical
//!   property of the matrix, or with its read-only state. The reason is given by [Conflict].
//! - [MatrixError::ShapeMismatch] a composite argument (a row vector, a block) has the wrong shape.

use thiserror::Error;

/// Errors returned by [crate::Matrix] and the decompositions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    /// An index or dimension argument is outside its valid range.
    #[error("argument `{param}` is out of range, valid range: {valid}")]
    OutOfRange {
        /// Name of the offending argument
        param : &'static str,
        /// Description of the valid range
        valid : &'static str,
    },

    /// The operation is not valid for the current matrix.
    #[error("invalid operation: {0}")]
    InvalidOperation(Conflict),

    /// A matrix argument does not have the required shape.
    #[error("invalid argument `{param}`: {reason}")]
    ShapeMismatch {
        /// Name of the offending argument
        param : &'static str,
        /// What is wrong with it
        reason : String,
    },
}

/// The precondition violated by an invalid operation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Conflict {
    #[error("matrix must be square, got {rows}x{columns}")]
    NotSquare { rows : usize, columns : usize },

    #[error("matrix is not symmetric")]
    NotSymmetric,

    #[error("matrix is not positive definite (failed at column {column})")]
    NotPositiveDefinite { column : usize },

    #[error("matrix is singular")]
    Singular,

    #[error("matrix is not full rank")]
    RankDeficient,

    #[error("dimension mismatch: {lhs:?} and {rhs:?}")]
    DimensionMismatch { lhs : [usize;2], rhs : [usize;2] },

    #[error("matrix is read-only")]
    ReadOnly,

    #[error("right-hand side must have exactly one column, got {columns}")]
    NotColumnVector { columns : usize },

    #[error("right-hand side must have {expected} rows, got {got}")]
    RowCountMismatch { expected : usize, got : usize },
}

impl MatrixError {
    pub(crate) fn out_of_range(param : &'static str, valid : &'static str) -> MatrixError {
        MatrixError::OutOfRange{ param, valid }
    }

    pub(crate) fn shape(param : &'static str, reason : impl Into<String>) -> MatrixError {
        MatrixError::ShapeMismatch{ param, reason : reason.into() }
    }

    /// Returns the name of the offending argument for range and shape errors.
    pub fn param(&self) -> Option<&'static str> {
        match self {
            MatrixError::OutOfRange{ param, .. } => Some(param),
            MatrixError::ShapeMismatch{ param, .. } => Some(param),
            MatrixError::InvalidOperation(_) => None,
        }
    }

    /// Returns the violated precondition for invalid operations.
    pub fn conflict(&self) -> Option<&Conflict> {
        if let MatrixError::InvalidOperation(c) = self { Some(c) } else { None }
    }
}

impl From<Conflict> for MatrixError {
    fn from(c : Conflict) -> MatrixError { MatrixError::InvalidOperation(c) }
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, MatrixError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let e = MatrixError::out_of_range("start_row", "0..=end_row");
        assert_eq!(e.to_string(), "argument `start_row` is out of range, valid range: 0..=end_row");
        assert_eq!(e.param(), Some("start_row"));

        let e : MatrixError = Conflict::NotSquare{ rows : 3, columns : 2 }.into();
        assert_eq!(e.to_string(), "invalid operation: matrix must be square, got 3x2");
        assert_eq!(e.conflict(), Some(&Conflict::NotSquare{ rows : 3, columns : 2 }));
        assert!(e.param().is_none());
    }
}
