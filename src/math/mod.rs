pub mod point;
pub use point::Point;

pub mod matrix2x3;
pub use matrix2x3::Matrix2x3;

use std::fmt::Debug;

pub trait ApproxEq {
	fn approx_eq(&self, other: &Self, tol: f64) -> bool;
}

impl ApproxEq for f64 {
	fn approx_eq(&self, other: &Self, tol: f64) -> bool {
		(self - other).abs() <= tol
	}
}

pub fn assert_approx_eq<T: ApproxEq + Debug>(left: &T, right: &T, tol: f64) {
	if !left.approx_eq(right, tol) {
		panic!("assertion failed: `(left ≈ right)`\n  left: `{:?}`\n right: `{:?}`\n   tol: `{}`", left, right, tol);
	}
}
