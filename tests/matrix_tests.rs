extern crate beamat;

use beamat::*;
use approx::assert_abs_diff_eq;

fn sample() -> Matrix {
    Matrix::from_array(&[[1.0, 2.0, 3.0],
                         [4.0, 5.0, 6.0],
                         [7.0, 8.0, 9.0]])
}

#[test]
fn submatrix() {
    let m = sample();
    assert_eq!(m.submatrix(1, 1, 2, 2).unwrap(), Matrix::from_array(&[[5.0, 6.0],[8.0, 9.0]]));
    assert_eq!(m.submatrix(0, 2, 2, 2).unwrap(), m.column(2).unwrap());
    assert_eq!(m.submatrix(0, 0, 2, 2).unwrap(), m);

    assert_eq!(m.submatrix(2, 0, 1, 1).unwrap_err().param(), Some("start_row"));
    assert_eq!(m.submatrix(0, 0, 3, 1).unwrap_err().param(), Some("end_row"));
    assert_eq!(m.submatrix(0, 2, 1, 1).unwrap_err().param(), Some("start_col"));
    assert_eq!(m.submatrix(0, 0, 1, 3).unwrap_err().param(), Some("end_col"));
}

#[test]
fn set_submatrix() {
    let mut m = sample();
    m.set_submatrix(0, 1, 1, 2, &Matrix::from_array(&[[-1.0, -2.0],[-3.0, -4.0]])).unwrap();
    assert_eq!(m, Matrix::from_array(&[[1.0, -1.0, -2.0],
                                       [4.0, -3.0, -4.0],
                                       [7.0,  8.0,  9.0]]));

    let e = m.set_submatrix(0, 0, 1, 1, &Matrix::new(3, 2).unwrap()).unwrap_err();
    assert!(matches!(e, MatrixError::ShapeMismatch{ param : "matrix", .. }));
    assert_eq!(m.set_submatrix(0, 0, 3, 1, &Matrix::new(4, 2).unwrap()).unwrap_err().param(), Some("end_row"));
    assert_eq!(m.get(0, 1).unwrap(), -1.0);
}

#[test]
fn rows_and_columns() {
    let mut m = sample();
    assert_eq!(m.row(1).unwrap(), Matrix::from_array(&[[4.0, 5.0, 6.0]]));
    assert_eq!(m.column(0).unwrap(), Matrix::from_array(&[[1.0],[4.0],[7.0]]));
    assert_eq!(m.row(3).unwrap_err().param(), Some("row"));
    assert_eq!(m.column(3).unwrap_err().param(), Some("column"));

    m.set_row(0, &Matrix::from_array(&[[0.0, 0.0, 1.0]])).unwrap();
    m.set_column(1, &Matrix::from_array(&[[2.0],[2.0],[2.0]])).unwrap();
    assert_eq!(m.to_array(), vec![vec![0.0, 2.0, 1.0],
                                  vec![4.0, 2.0, 6.0],
                                  vec![7.0, 2.0, 9.0]]);

    assert!(matches!(m.set_row(0, &Matrix::new(2, 3).unwrap()), Err(MatrixError::ShapeMismatch{ param : "vector", .. })));
    assert!(matches!(m.set_row(0, &Matrix::new(1, 2).unwrap()), Err(MatrixError::ShapeMismatch{ param : "vector", .. })));
    assert!(matches!(m.set_column(0, &Matrix::new(3, 2).unwrap()), Err(MatrixError::ShapeMismatch{ param : "vector", .. })));
    assert!(matches!(m.set_column(0, &Matrix::new(2, 1).unwrap()), Err(MatrixError::ShapeMismatch{ param : "vector", .. })));
    assert_eq!(m.set_row(5, &Matrix::new(1, 3).unwrap()).unwrap_err().param(), Some("row"));
}

#[test]
fn sums() {
    let m = sample();
    assert_eq!(m.sum_row(0).unwrap(), 6.0);
    assert_eq!(m.sum_column(2).unwrap(), 18.0);
    assert_eq!(m.sum_row(3).unwrap_err().param(), Some("row"));
    assert_eq!(m.sum_column(3).unwrap_err().param(), Some("column"));
}

#[test]
fn element_access() {
    let mut m = Matrix::new(2, 3).unwrap();
    m.set(1, 2, 4.5).unwrap();
    assert_eq!(m.get(1, 2).unwrap(), 4.5);
    assert_eq!(m[(1,2)], 4.5);
    assert_eq!(m.get(2, 0).unwrap_err().param(), Some("row"));
    assert_eq!(m.set(0, 3, 1.0).unwrap_err().param(), Some("column"));
}

#[test]
fn resize() {
    let m = sample();
    assert_eq!(m.resize(2, 4).unwrap(), Matrix::from_array(&[[1.0, 2.0, 3.0, 0.0],
                                                             [4.0, 5.0, 6.0, 0.0]]));
    assert_eq!(m.resize(1, 1).unwrap(), Matrix::from_array(&[[1.0]]));
    assert_eq!(m.resize(0, 1).unwrap_err().param(), Some("rows"));
    assert_eq!(m.resize(1, 0).unwrap_err().param(), Some("columns"));
}

#[test]
fn pow() {
    let a = Matrix::from_array(&[[1.0, 1.0],
                                 [0.0, 1.0]]);
    assert_eq!(a.pow(0).unwrap(), Matrix::identity(2).unwrap());
    assert_eq!(a.pow(1).unwrap(), a);
    assert_eq!(a.pow(2).unwrap(), Matrix::from_array(&[[1.0, 2.0],[0.0, 1.0]]));
    assert_eq!(a.pow(3).unwrap(), Matrix::from_array(&[[1.0, 3.0],[0.0, 1.0]]));
    assert_eq!(a.pow(10).unwrap(), Matrix::from_array(&[[1.0, 10.0],[0.0, 1.0]]));

    let e = Matrix::new(2, 3).unwrap().pow(2).unwrap_err();
    assert_eq!(e.conflict(), Some(&Conflict::NotSquare{ rows : 2, columns : 3 }));
}

#[test]
fn times() {
    let a = sample();
    assert_eq!(a.times(&a).unwrap(), a.map(|v| v*v));
    assert!(a.times(&Matrix::new(3, 2).unwrap()).is_err());
}

#[test]
fn clone_is_independent() {
    let a = sample();
    let mut b = a.clone();
    b.set(0, 0, 100.0).unwrap();
    assert_eq!(a.get(0, 0).unwrap(), 1.0);
    assert_ne!(a, b);

    let r = a.as_read_only();
    let mut w = r.clone();
    assert!(r.is_read_only());
    assert!(! w.is_read_only());
    w.set(2, 2, 0.0).unwrap();
    assert_eq!(r, a);
}

#[test]
fn predicates() {
    let s = Matrix::from_array(&[[2.0, 1.0],[1.0, 3.0]]);
    assert!(s.is_symmetric());
    assert!(! sample().is_symmetric());
    assert!(! Matrix::new(2, 3).unwrap().is_symmetric());
    assert!(Matrix::from_array(&[[1.0, 1e-13],[0.0, 1.0]]).is_symmetric());
    assert!(! Matrix::from_array(&[[1.0, 1e-3],[0.0, 1.0]]).is_symmetric());
    assert!(Matrix::from_array(&[[1.0, 1e-3],[0.0, 1.0]]).is_symmetric_within(1e-2));

    assert!(Matrix::new(3, 3).unwrap().is_zero());
    assert!(Matrix::from_array(&[[1e-13]]).is_zero());
    assert!(! Matrix::from_array(&[[1e-6]]).is_zero());

    assert!(! sample().is_nan());
    assert!(Matrix::from_array(&[[1.0, f64::NAN]]).is_nan());
    assert!(sample().is_square());
    assert!(! Matrix::new(1, 2).unwrap().is_square());
}

#[test]
fn derived_properties() {
    let a = Matrix::from_array(&[[2.0, 0.0, 1.0],
                                 [1.0, 3.0, 0.0],
                                 [0.0, 1.0, 4.0]]);
    assert_eq!(a.trace().unwrap(), 9.0);
    assert_abs_diff_eq!(a.determinant().unwrap(), 25.0, epsilon = 1e-10);
    assert_eq!(a.rank(), 3);
    assert_eq!(a.transpose().get(0, 1).unwrap(), 1.0);
    assert!(a.transpose().is_read_only());
    assert_eq!(a.transpose().transpose(), &a);

    let inv = a.inverse().unwrap();
    assert!(inv.is_read_only());
    assert!((&a * inv).unwrap().approx_eq(&Matrix::identity(3).unwrap(), 1e-10));

    assert_eq!(sample().rank(), 2);
    assert!(sample().determinant().unwrap().abs() < 1e-9);
    assert_eq!(sample().inverse().unwrap_err().conflict(), Some(&Conflict::Singular));
}

#[test]
fn non_square_properties() {
    let a = Matrix::new(2, 3).unwrap();
    let ns = Conflict::NotSquare{ rows : 2, columns : 3 };
    assert_eq!(a.trace().unwrap_err().conflict(), Some(&ns));
    assert_eq!(a.determinant().unwrap_err().conflict(), Some(&ns));
    assert_eq!(a.inverse().unwrap_err().conflict(), Some(&ns));
    assert_eq!(a.transpose().shape(), [3,2]);
    assert_eq!(a.rank(), 0);
}

#[test]
fn cache_follows_mutation() {
    let mut a = Matrix::identity(3).unwrap();
    assert_eq!(a.determinant().unwrap(), 1.0);
    assert_eq!(a.rank(), 3);
    assert_eq!(a.inverse().unwrap(), &Matrix::identity(3).unwrap());

    a.set(1, 1, 2.0).unwrap();
    assert_abs_diff_eq!(a.determinant().unwrap(), 2.0, epsilon = EPSILON);
    assert_eq!(a.inverse().unwrap().get(1, 1).unwrap(), 0.5);
    assert_eq!(a.trace().unwrap(), 4.0);

    a.set_row(2, &Matrix::new(1, 3).unwrap()).unwrap();
    assert_eq!(a.rank(), 2);
    assert_eq!(a.determinant().unwrap(), 0.0);
    assert_eq!(a.transpose().get(2, 2).unwrap(), 0.0);
}

#[test]
fn display() {
    let m = Matrix::from_array(&[[1.0, 0.5],
                                 [-3.25, 100.0]]);
    assert_eq!(format!("{}", m), "[    1.0000,     0.5000]\n[   -3.2500,   100.0000]\n");
}
