use auto_ops::impl_op_ex;
use super::ApproxEq;

pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

#[derive(Default, Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
	pub x: f64,
	pub y: f64
}

impl Point {
	pub fn new() -> Self {
		ZERO
	}

	pub fn from(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn from_scalar(scalar: f64) -> Self {
		Self { x: scalar, y: scalar }
	}

	pub fn set(&mut self, x: f64, y: f64) {
		self.x = x;
		self.y = y;
	}
}

impl_op_ex!(+ |a: &Point, b: &Point| -> Point {
	Point { x: a.x + b.x, y: a.y + b.y }
});

impl_op_ex!(- |a: &Point, b: &Point| -> Point {
	Point { x: a.x - b.x, y: a.y - b.y }
});

impl_op_ex!(+= |a: &mut Point, b: &Point| {
	a.x += b.x;
	a.y += b.y;
});

impl_op_ex!(-= |a: &mut Point, b: &Point| {
	a.x -= b.x;
	a.y -= b.y;
});

impl_op_ex!(* |a: &Point, b: f64| -> Point {
	Point { x: a.x * b, y: a.y * b }
});

impl_op_ex!(*= |a: &mut Point, b: f64| {
	a.x *= b;
	a.y *= b;
});

impl_op_ex!(- |a: &Point| -> Point {
	Point { x: -a.x, y: -a.y }
});

impl ApproxEq for Point {
	fn approx_eq(&self, other: &Self, tol: f64) -> bool {
		(self.x - other.x).abs() <= tol && (self.y - other.y).abs() <= tol
	}
}
