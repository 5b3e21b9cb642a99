//! Elimination based operations on a [Matrix](crate::Matrix).
//!
//! These are stateless functions of the matrix contents. Each works on a private copy of the
//! values and returns a new value or matrix; the input is never modified. [Matrix](crate::Matrix)
//! calls them through its cached properties, but they can also be used directly.

mod determinant;
mod inverse;
mod rank;
mod trace;
mod transpose;

pub use determinant::determinant;
pub use inverse::inverse;
pub use rank::rank;
pub use trace::trace;
pub use transpose::transpose;
