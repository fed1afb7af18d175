use std::ops::{Deref, DerefMut};
use crate::math::{matrix2x3, point, Matrix2x3, Point};
use super::Transform;

#[derive(Clone, Debug)]
pub struct Transform2D {
	pub position: Point,
	pub scale: Point,
	pub pivot: Point,
	skew: Point,
	rotation: f64,
	sin_rotation: f64,
	cos_rotation: f64,
	cos_skew_y: f64,
	sin_skew_y: f64,
	sin_skew_x: f64,
	cos_skew_x: f64,
	local_transform: Matrix2x3,
	world_transform: Matrix2x3,
	world_version: u64
}

impl Transform2D {
	pub fn new() -> Self {
		Self {
			position: point::ZERO,
			scale: Point::from_scalar(1.0),
			pivot: point::ZERO,
			skew: point::ZERO,
			rotation: 0.0,
			sin_rotation: 0.0,
			cos_rotation: 1.0,
			cos_skew_y: 1.0,
			sin_skew_y: 0.0,
			sin_skew_x: 0.0,
			cos_skew_x: 1.0,
			local_transform: matrix2x3::IDENTITY,
			world_transform: matrix2x3::IDENTITY,
			world_version: 0
		}
	}

	pub fn rotation(&self) -> f64 {
		self.rotation
	}

	pub fn set_rotation(&mut self, rotation: f64) {
		self.rotation = rotation;
		let (sin, cos) = rotation.sin_cos();
		self.sin_rotation = sin;
		self.cos_rotation = cos;
	}

	pub fn skew(&self) -> &Point {
		&self.skew
	}

	pub fn set_skew(&mut self, x: f64, y: f64) {
		self.skew.set(x, y);
		self.update_skew();
	}

	pub fn set_skew_x(&mut self, x: f64) {
		self.skew.x = x;
		self.update_skew();
	}

	pub fn set_skew_y(&mut self, y: f64) {
		self.skew.y = y;
		self.update_skew();
	}

	/// Mutable access to the skew angles. The trig cache is refreshed when the guard drops.
	pub fn skew_mut(&mut self) -> SkewMut<'_> {
		SkewMut { transform: self }
	}

	fn update_skew(&mut self) {
		let (sin_y, cos_y) = self.skew.y.sin_cos();
		let (sin_x, cos_x) = self.skew.x.sin_cos();
		self.cos_skew_y = cos_y;
		self.sin_skew_y = sin_y;
		self.sin_skew_x = sin_x;
		self.cos_skew_x = cos_x;
	}

	// Scale, then rotation, then skew. Translation is left alone.
	fn update_linear(&mut self) {
		let a = self.cos_rotation * self.scale.x;
		let b = self.sin_rotation * self.scale.x;
		let c = -self.sin_rotation * self.scale.y;
		let d = self.cos_rotation * self.scale.y;

		let lt = &mut self.local_transform;
		lt.a = self.cos_skew_y * a + self.sin_skew_y * c;
		lt.b = self.cos_skew_y * b + self.sin_skew_y * d;
		lt.c = self.sin_skew_x * a + self.cos_skew_x * c;
		lt.d = self.sin_skew_x * b + self.cos_skew_x * d;
	}

	/// Rebuilds the linear part of the local matrix. `tx`/`ty` keep the values from the last
	/// [`Transform::update_transform`] and the world version is untouched.
	pub fn update_local_transform(&mut self) {
		self.update_linear();
	}
}

impl Transform for Transform2D {
	fn local_transform(&self) -> &Matrix2x3 {
		&self.local_transform
	}

	fn world_transform(&self) -> &Matrix2x3 {
		&self.world_transform
	}

	fn world_version(&self) -> u64 {
		self.world_version
	}

	fn update_transform(&mut self, parent_world: &Matrix2x3) {
		self.update_linear();

		let lt = &mut self.local_transform;
		lt.tx = self.position.x - (self.pivot.x * lt.a + self.pivot.y * lt.c);
		lt.ty = self.position.y - (self.pivot.x * lt.b + self.pivot.y * lt.d);

		self.world_transform.set_concat(parent_world, &self.local_transform);
		self.world_version += 1;
	}

	fn set_from_matrix(&mut self, matrix: &Matrix2x3) {
		matrix.decompose(self);
	}
}

impl Default for Transform2D {
	fn default() -> Self {
		Self::new()
	}
}

pub struct SkewMut<'a> {
	transform: &'a mut Transform2D
}

impl Deref for SkewMut<'_> {
	type Target = Point;

	fn deref(&self) -> &Point {
		&self.transform.skew
	}
}

impl DerefMut for SkewMut<'_> {
	fn deref_mut(&mut self) -> &mut Point {
		&mut self.transform.skew
	}
}

impl Drop for SkewMut<'_> {
	fn drop(&mut self) {
		self.transform.update_skew();
	}
}
