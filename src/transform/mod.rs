use crate::math::Matrix2x3;

pub mod transform2d;
pub use transform2d::{Transform2D, SkewMut};

pub mod matrix_transform2d;
pub use matrix_transform2d::MatrixTransform2D;

pub trait Transform {
	fn local_transform(&self) -> &Matrix2x3;
	fn world_transform(&self) -> &Matrix2x3;

	/// Starts at 0 and increases by exactly one per [`Transform::update_transform`] call.
	fn world_version(&self) -> u64;

	/// Recomputes the local matrix and concatenates it with `parent_world`. Children must be
	/// updated after their parent within a pass.
	fn update_transform(&mut self, parent_world: &Matrix2x3);

	fn set_from_matrix(&mut self, matrix: &Matrix2x3);
}
