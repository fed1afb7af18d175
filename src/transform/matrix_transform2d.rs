use crate::math::{matrix2x3, Matrix2x3};
use super::Transform;

#[derive(Clone, Debug)]
pub struct MatrixTransform2D {
	local_transform: Matrix2x3,
	world_transform: Matrix2x3,
	world_version: u64
}

impl MatrixTransform2D {
	pub fn new() -> Self {
		Self {
			local_transform: matrix2x3::IDENTITY,
			world_transform: matrix2x3::IDENTITY,
			world_version: 0
		}
	}

	pub fn from(local: Matrix2x3) -> Self {
		Self {
			local_transform: local,
			..Self::new()
		}
	}

	pub fn set_local(&mut self, local: &Matrix2x3) {
		self.local_transform.copy_from(local);
	}
}

impl Transform for MatrixTransform2D {
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
		self.world_transform.set_concat(parent_world, &self.local_transform);
		self.world_version += 1;
	}

	fn set_from_matrix(&mut self, matrix: &Matrix2x3) {
		self.set_local(matrix);
	}
}

impl Default for MatrixTransform2D {
	fn default() -> Self {
		Self::new()
	}
}
