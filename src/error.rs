use thiserror::Error;
use crate::pool::Handle;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
	#[error("node handle {index}v{generation} is stale or was not issued by this graph")]
	StaleHandle { index: usize, generation: u32 },

	#[error("node {node} cannot be parented to {parent}, which is itself or one of its descendants")]
	CyclicParent { node: usize, parent: usize }
}

impl GraphError {
	pub(crate) fn stale<T>(handle: Handle<T>) -> Self {
		GraphError::StaleHandle {
			index: handle.index,
			generation: handle.generation
		}
	}
}

pub type Result<T, E = GraphError> = std::result::Result<T, E>;
