pub mod math;
pub use math::{Point, Matrix2x3};

pub mod transform;
pub use transform::{Transform, Transform2D, MatrixTransform2D};

pub mod pool;
pub use pool::{Pool, Handle};

pub mod graph;
pub use graph::{Graph, Node, NodeHandle};

pub mod error;
pub use error::{GraphError, Result};
