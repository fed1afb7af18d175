use std::{f64::consts::TAU, fmt};
use auto_ops::impl_op_ex;
use super::{ApproxEq, Point};
use crate::transform::Transform2D;

pub const IDENTITY: Matrix2x3 = Matrix2x3 {
	a: 1.0,
	b: 0.0,
	c: 0.0,
	d: 1.0,
	tx: 0.0,
	ty: 0.0
};

/// Below this, `|skew_x + skew_y|` is treated as zero by [`Matrix2x3::decompose`] and the
/// linear part is read back as a pure rotation.
pub const DECOMPOSE_EPSILON: f64 = 1e-5;

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix2x3 {
	pub a: f64,
	pub b: f64,
	pub c: f64,
	pub d: f64,
	pub tx: f64,
	pub ty: f64
}

impl Matrix2x3 {
	pub fn new() -> Self {
		IDENTITY
	}

	pub fn from(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
		Self { a, b, c, d, tx, ty }
	}

	pub fn set(&mut self, a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) {
		self.a = a;
		self.b = b;
		self.c = c;
		self.d = d;
		self.tx = tx;
		self.ty = ty;
	}

	pub fn identity(&mut self) {
		*self = IDENTITY;
	}

	pub fn copy_from(&mut self, other: &Self) {
		*self = *other;
	}

	/// Overwrites `self` with `parent * local`: `local` is applied first, then `parent`.
	pub fn set_concat(&mut self, parent: &Self, local: &Self) {
		self.a = local.a * parent.a + local.b * parent.c;
		self.b = local.a * parent.b + local.b * parent.d;
		self.c = local.c * parent.a + local.d * parent.c;
		self.d = local.c * parent.b + local.d * parent.d;
		self.tx = local.tx * parent.a + local.ty * parent.c + parent.tx;
		self.ty = local.tx * parent.b + local.ty * parent.d + parent.ty;
	}

	pub fn translate(&mut self, x: f64, y: f64) {
		self.tx += x;
		self.ty += y;
	}

	pub fn scale(&mut self, x: f64, y: f64) {
		self.a *= x;
		self.d *= y;
		self.c *= x;
		self.b *= y;
		self.tx *= x;
		self.ty *= y;
	}

	pub fn rotate(&mut self, angle: f64) {
		let (sin, cos) = angle.sin_cos();
		let (a, c, tx) = (self.a, self.c, self.tx);

		self.a = a * cos - self.b * sin;
		self.b = a * sin + self.b * cos;
		self.c = c * cos - self.d * sin;
		self.d = c * sin + self.d * cos;
		self.tx = tx * cos - self.ty * sin;
		self.ty = tx * sin + self.ty * cos;
	}

	pub fn apply(&self, point: &Point) -> Point {
		Point {
			x: self.a * point.x + self.c * point.y + self.tx,
			y: self.b * point.x + self.d * point.y + self.ty
		}
	}

	pub fn to_array(&self, transpose: bool) -> [f64; 9] {
		if transpose {
			[
				self.a, self.b, 0.0,
				self.c, self.d, 0.0,
				self.tx, self.ty, 1.0
			]
		}
		else {
			[
				self.a, self.c, self.tx,
				self.b, self.d, self.ty,
				0.0, 0.0, 1.0
			]
		}
	}

	/// Writes position, scale, skew and rotation into `transform` so that updating it under an
	/// identity parent reproduces this matrix.
	///
	/// A mirrored matrix (negative determinant) is read with a negative y scale. When the skew
	/// angles cancel out the matrix is read as a pure rotation and skew is zeroed. Otherwise
	/// rotation is zeroed and everything goes into skew, which only reproduces the matrix exactly
	/// for uniform scale. The transform's pivot is kept and folded into position.
	pub fn decompose(&self, transform: &mut Transform2D) {
		let (a, b, c, d) = (self.a, self.b, self.c, self.d);

		let mirrored = a * d - b * c < 0.0;
		let (c_unmirrored, d_unmirrored) = if mirrored { (-c, -d) } else { (c, d) };

		let skew_x = -(-c_unmirrored).atan2(d_unmirrored);
		let skew_y = b.atan2(a);
		let delta = (skew_x + skew_y).abs();

		if delta < DECOMPOSE_EPSILON || (TAU - delta).abs() < DECOMPOSE_EPSILON {
			transform.set_rotation(skew_y);
			transform.set_skew(0.0, 0.0);
		}
		else {
			transform.set_rotation(0.0);
			transform.set_skew(skew_x, skew_y);
		}

		let scale_y = c.hypot(d);
		transform.scale.set(a.hypot(b), if mirrored { -scale_y } else { scale_y });

		let pivot = transform.pivot;
		transform.position.set(
			self.tx + pivot.x * a + pivot.y * c,
			self.ty + pivot.x * b + pivot.y * d);
	}
}

impl Default for Matrix2x3 {
	fn default() -> Self {
		IDENTITY
	}
}

impl_op_ex!(* |parent: &Matrix2x3, local: &Matrix2x3| -> Matrix2x3 {
	let mut r = IDENTITY;
	r.set_concat(parent, local);
	r
});

impl ApproxEq for Matrix2x3 {
	fn approx_eq(&self, other: &Self, tol: f64) -> bool {
		self.to_array(false).iter()
			.zip(other.to_array(false).iter())
			.all(|(l, r)| (l - r).abs() <= tol)
	}
}

impl fmt::Display for Matrix2x3 {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "[{} {} {}]\n[{} {} {}]", self.a, self.c, self.tx, self.b, self.d, self.ty)
	}
}
