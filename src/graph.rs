use log::{debug, trace};
use crate::{
	error::{GraphError, Result},
	math::{matrix2x3, Matrix2x3},
	pool::{Handle, Pool},
	transform::{Transform, Transform2D}
};

pub type NodeHandle<T> = Handle<Node<T>>;

pub struct Node<T> {
	parent: Option<NodeHandle<T>>,
	children: Vec<NodeHandle<T>>,
	dirty: bool,
	transform: T
}

impl<T> Node<T> {
	fn new(transform: T, parent: Option<NodeHandle<T>>) -> Self {
		Self {
			parent,
			children: vec![],
			dirty: true,
			transform
		}
	}
}

pub struct Graph<T: Transform = Transform2D> {
	nodes: Pool<Node<T>>,
	roots: Vec<NodeHandle<T>>
}

impl<T: Transform> Graph<T> {
	pub fn new() -> Self {
		Self {
			nodes: Pool::new(),
			roots: vec![]
		}
	}

	pub fn add(&mut self, transform: T) -> NodeHandle<T> {
		let handle = self.nodes.add(Node::new(transform, None));
		self.roots.push(handle);
		debug!("Added root node {:?}", handle);
		handle
	}

	pub fn add_child(&mut self, parent: NodeHandle<T>, transform: T) -> Result<NodeHandle<T>> {
		self.node(parent)?;

		let handle = self.nodes.add(Node::new(transform, Some(parent)));
		self.node_mut(parent)?.children.push(handle);
		debug!("Added node {:?} under {:?}", handle, parent);
		Ok(handle)
	}

	pub fn set_parent(&mut self, handle: NodeHandle<T>, parent: Option<NodeHandle<T>>) -> Result<()> {
		let old_parent = self.node(handle)?.parent;

		let mut ancestor = parent;
		while let Some(current) = ancestor {
			if current == handle {
				return Err(GraphError::CyclicParent {
					node: handle.index,
					parent: parent.map_or(handle.index, |p| p.index)
				});
			}

			ancestor = self.node(current)?.parent;
		}

		self.detach(handle, old_parent);

		match parent {
			Some(parent) => self.node_mut(parent)?.children.push(handle),
			None => self.roots.push(handle)
		}

		self.node_mut(handle)?.parent = parent;
		self.mark_dirty(handle);
		debug!("Moved node {:?} from {:?} to {:?}", handle, old_parent, parent);
		Ok(())
	}

	pub fn remove(&mut self, handle: NodeHandle<T>) -> Result<()> {
		let parent = self.node(handle)?.parent;
		self.detach(handle, parent);

		let mut handles_to_remove = vec![handle];
		let mut removed = 0;

		while let Some(handle) = handles_to_remove.pop() {
			if let Some(node) = self.nodes.remove(handle) {
				handles_to_remove.extend(node.children);
				removed += 1;
			}
		}

		debug!("Removed node {:?} and {} descendant(s)", handle, removed - 1);
		Ok(())
	}

	pub fn borrow_transform(&self, handle: NodeHandle<T>) -> Result<&T> {
		Ok(&self.node(handle)?.transform)
	}

	pub fn borrow_transform_mut(&mut self, handle: NodeHandle<T>) -> Result<&mut T> {
		self.node(handle)?;
		self.mark_dirty(handle);
		Ok(&mut self.node_mut(handle)?.transform)
	}

	pub fn parent(&self, handle: NodeHandle<T>) -> Result<Option<NodeHandle<T>>> {
		Ok(self.node(handle)?.parent)
	}

	pub fn children(&self, handle: NodeHandle<T>) -> Result<&[NodeHandle<T>]> {
		Ok(&self.node(handle)?.children)
	}

	pub fn is_dirty(&self, handle: NodeHandle<T>) -> Result<bool> {
		Ok(self.node(handle)?.dirty)
	}

	pub fn contains(&self, handle: NodeHandle<T>) -> bool {
		self.nodes.valid(handle)
	}

	pub fn roots(&self) -> &[NodeHandle<T>] {
		&self.roots
	}

	pub fn len(&self) -> usize {
		self.nodes.present_len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Parents are recomputed before their children. Returns the number of nodes recomputed.
	pub fn update(&mut self) -> usize {
		let mut nodes_to_visit: Vec<(NodeHandle<T>, Matrix2x3)> = self.roots.iter()
			.rev()
			.map(|&root| (root, matrix2x3::IDENTITY))
			.collect();
		let mut updated = 0;

		while let Some((handle, parent_world)) = nodes_to_visit.pop() {
			let node = match self.nodes.get_mut(handle) {
				Some(node) => node,
				None => continue
			};

			if node.dirty {
				node.transform.update_transform(&parent_world);
				node.dirty = false;
				updated += 1;
			}

			let world = *node.transform.world_transform();
			nodes_to_visit.extend(node.children.iter().rev().map(|&child| (child, world)));
		}

		trace!("Updated {} of {} node(s)", updated, self.len());
		updated
	}

	fn node(&self, handle: NodeHandle<T>) -> Result<&Node<T>> {
		self.nodes.get(handle).ok_or_else(|| GraphError::stale(handle))
	}

	fn node_mut(&mut self, handle: NodeHandle<T>) -> Result<&mut Node<T>> {
		self.nodes.get_mut(handle).ok_or_else(|| GraphError::stale(handle))
	}

	// A dirty node's descendants are always dirty, so marking stops at the first dirty node.
	fn mark_dirty(&mut self, handle: NodeHandle<T>) {
		let mut handles_to_visit = vec![handle];

		while let Some(handle) = handles_to_visit.pop() {
			if let Some(node) = self.nodes.get_mut(handle) {
				if node.dirty {
					continue;
				}

				node.dirty = true;
				handles_to_visit.extend_from_slice(&node.children);
			}
		}
	}

	fn detach(&mut self, handle: NodeHandle<T>, parent: Option<NodeHandle<T>>) {
		let siblings = match parent {
			Some(parent) => match self.nodes.get_mut(parent) {
				Some(node) => &mut node.children,
				None => return
			},
			None => &mut self.roots
		};

		siblings.retain(|&sibling| sibling != handle);
	}
}

impl<T: Transform> Default for Graph<T> {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use std::f64::consts::FRAC_PI_2;
	use super::*;
	use crate::{math::{assert_approx_eq, matrix2x3::IDENTITY}, transform::MatrixTransform2D};

	fn translated(x: f64, y: f64) -> Transform2D {
		let mut t = Transform2D::new();
		t.position.set(x, y);
		t
	}

	#[test]
	fn root_update() {
		let mut graph = Graph::new();
		let root = graph.add(translated(5.0, 7.0));

		assert!(graph.is_dirty(root).unwrap());
		assert_eq!(graph.update(), 1);
		assert!(!graph.is_dirty(root).unwrap());

		let t = graph.borrow_transform(root).unwrap();
		assert_eq!(*t.world_transform(), Matrix2x3::from(1.0, 0.0, 0.0, 1.0, 5.0, 7.0));
		assert_eq!(t.world_version(), 1);
	}

	#[test]
	fn clean_nodes_are_skipped() {
		let mut graph = Graph::new();
		let root = graph.add(Transform2D::new());
		graph.add_child(root, Transform2D::new()).unwrap();

		assert_eq!(graph.update(), 2);
		assert_eq!(graph.update(), 0);
		assert_eq!(graph.borrow_transform(root).unwrap().world_version(), 1);
	}

	#[test]
	fn child_uses_parent_world() {
		let mut graph = Graph::new();

		let mut parent = translated(10.0, 10.0);
		parent.scale.set(2.0, 2.0);
		let parent = graph.add(parent);
		let child = graph.add_child(parent, translated(1.0, 0.0)).unwrap();
		let grandchild = graph.add_child(child, translated(0.0, 1.0)).unwrap();

		graph.update();

		let child_world = *graph.borrow_transform(child).unwrap().world_transform();
		assert_eq!(child_world, Matrix2x3::from(2.0, 0.0, 0.0, 2.0, 12.0, 10.0));

		let grandchild_world = *graph.borrow_transform(grandchild).unwrap().world_transform();
		assert_eq!(grandchild_world, Matrix2x3::from(2.0, 0.0, 0.0, 2.0, 12.0, 12.0));
	}

	#[test]
	fn mutating_parent_dirties_subtree() {
		let mut graph = Graph::new();
		let parent = graph.add(Transform2D::new());
		let child = graph.add_child(parent, translated(1.0, 0.0)).unwrap();
		let sibling = graph.add(Transform2D::new());
		graph.update();

		graph.borrow_transform_mut(parent).unwrap().set_rotation(FRAC_PI_2);
		assert!(graph.is_dirty(child).unwrap());
		assert!(!graph.is_dirty(sibling).unwrap());

		assert_eq!(graph.update(), 2);

		let child = graph.borrow_transform(child).unwrap();
		assert_eq!(child.world_version(), 2);
		assert_approx_eq(child.world_transform(), &Matrix2x3::from(0.0, 1.0, -1.0, 0.0, 0.0, 1.0), 1e-12);
		assert_eq!(graph.borrow_transform(sibling).unwrap().world_version(), 1);
	}

	#[test]
	fn mutating_child_keeps_parent_clean() {
		let mut graph = Graph::new();
		let parent = graph.add(translated(3.0, 0.0));
		let child = graph.add_child(parent, Transform2D::new()).unwrap();
		graph.update();

		graph.borrow_transform_mut(child).unwrap().position.set(0.0, 4.0);
		assert!(!graph.is_dirty(parent).unwrap());
		assert_eq!(graph.update(), 1);

		let world = *graph.borrow_transform(child).unwrap().world_transform();
		assert_eq!(world, Matrix2x3::from(1.0, 0.0, 0.0, 1.0, 3.0, 4.0));
		assert_eq!(graph.borrow_transform(parent).unwrap().world_version(), 1);
	}

	#[test]
	fn set_parent_moves_node() {
		let mut graph = Graph::new();
		let a = graph.add(translated(10.0, 0.0));
		let b = graph.add(translated(0.0, 20.0));
		let child = graph.add_child(a, translated(1.0, 1.0)).unwrap();
		graph.update();

		graph.set_parent(child, Some(b)).unwrap();
		assert_eq!(graph.parent(child).unwrap(), Some(b));
		assert!(graph.children(a).unwrap().is_empty());
		assert_eq!(graph.children(b).unwrap(), &[child]);
		assert_eq!(graph.update(), 1);

		let world = *graph.borrow_transform(child).unwrap().world_transform();
		assert_eq!(world, Matrix2x3::from(1.0, 0.0, 0.0, 1.0, 1.0, 21.0));

		graph.set_parent(child, None).unwrap();
		assert_eq!(graph.roots(), &[a, b, child]);
		graph.update();
		let world = *graph.borrow_transform(child).unwrap().world_transform();
		assert_eq!(world, Matrix2x3::from(1.0, 0.0, 0.0, 1.0, 1.0, 1.0));
	}

	#[test]
	fn set_parent_rejects_cycles() {
		let mut graph = Graph::new();
		let root = graph.add(Transform2D::new());
		let child = graph.add_child(root, Transform2D::new()).unwrap();
		let grandchild = graph.add_child(child, Transform2D::new()).unwrap();

		assert_eq!(
			graph.set_parent(root, Some(grandchild)),
			Err(GraphError::CyclicParent { node: root.index, parent: grandchild.index }));
		assert_eq!(
			graph.set_parent(child, Some(child)),
			Err(GraphError::CyclicParent { node: child.index, parent: child.index }));
		assert_eq!(graph.parent(child).unwrap(), Some(root));
	}

	#[test]
	fn set_parent_rejects_stale_handles() {
		let mut graph = Graph::new();
		let root = graph.add(Transform2D::new());
		let child = graph.add_child(root, Transform2D::new()).unwrap();
		let removed = graph.add_child(root, Transform2D::new()).unwrap();
		graph.remove(removed).unwrap();
		graph.update();

		assert_eq!(graph.set_parent(child, Some(removed)), Err(GraphError::stale(removed)));
		assert_eq!(graph.set_parent(removed, Some(root)), Err(GraphError::stale(removed)));
		assert_eq!(graph.set_parent(removed, None), Err(GraphError::stale(removed)));

		assert_eq!(graph.parent(child).unwrap(), Some(root));
		assert_eq!(graph.children(root).unwrap(), &[child]);
		assert_eq!(graph.roots(), &[root]);
		assert!(!graph.is_dirty(child).unwrap());
		assert!(!graph.contains(removed));
		assert!(graph.contains(child));
	}

	#[test]
	fn remove_drops_subtree() {
		let mut graph = Graph::new();
		let root = graph.add(Transform2D::new());
		let child = graph.add_child(root, Transform2D::new()).unwrap();
		let grandchild = graph.add_child(child, Transform2D::new()).unwrap();
		let other = graph.add_child(root, Transform2D::new()).unwrap();
		assert_eq!(graph.len(), 4);

		graph.remove(child).unwrap();

		assert_eq!(graph.len(), 2);
		assert_eq!(graph.children(root).unwrap(), &[other]);
		assert_eq!(graph.borrow_transform(grandchild).err(), Some(GraphError::stale(grandchild)));
		assert_eq!(graph.remove(child), Err(GraphError::stale(child)));
		assert_eq!(graph.update(), 2);
	}

	#[test]
	fn stale_handle_after_reuse() {
		let mut graph = Graph::new();
		let old = graph.add(Transform2D::new());
		graph.remove(old).unwrap();
		let new = graph.add(Transform2D::new());

		assert!(!graph.is_empty());
		assert!(graph.borrow_transform_mut(old).is_err());
		assert!(graph.add_child(old, Transform2D::new()).is_err());
		assert!(graph.borrow_transform(new).is_ok());
		assert_eq!(graph.roots(), &[new]);
	}

	#[test]
	fn matrix_transforms() {
		let mut graph: Graph<MatrixTransform2D> = Graph::new();
		let root = graph.add(MatrixTransform2D::from(Matrix2x3::from(2.0, 0.0, 0.0, 2.0, 10.0, 10.0)));
		let child = graph.add_child(root, MatrixTransform2D::new()).unwrap();
		graph.update();

		assert_eq!(*graph.borrow_transform(child).unwrap().world_transform(), Matrix2x3::from(2.0, 0.0, 0.0, 2.0, 10.0, 10.0));

		graph.borrow_transform_mut(root).unwrap().set_from_matrix(&IDENTITY);
		assert_eq!(graph.update(), 2);
		assert_eq!(*graph.borrow_transform(child).unwrap().world_transform(), IDENTITY);
	}
}
