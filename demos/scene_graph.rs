use scene_transform::{Graph, GraphError, Transform, Transform2D};

fn main() -> Result<(), GraphError> {
	env_logger::init();

	let mut graph = Graph::new();

	let mut arm = Transform2D::new();
	arm.position.set(100.0, 100.0);
	let arm_handle = graph.add(arm);

	let mut forearm = Transform2D::new();
	forearm.position.set(40.0, 0.0);
	let forearm_handle = graph.add_child(arm_handle, forearm)?;

	let mut hand = Transform2D::new();
	hand.position.set(30.0, 0.0);
	hand.pivot.set(5.0, 5.0);
	let hand_handle = graph.add_child(forearm_handle, hand)?;

	for frame in 0..4 {
		let arm = graph.borrow_transform_mut(arm_handle)?;
		arm.set_rotation(arm.rotation() + 0.25);

		if frame % 2 == 1 {
			graph.borrow_transform_mut(hand_handle)?.skew_mut().x += 0.1;
		}

		let updated = graph.update();
		let hand = graph.borrow_transform(hand_handle)?;

		println!("frame {} ({} node(s) recomputed), hand version {}", frame, updated, hand.world_version());
		println!("{}", hand.world_transform());
	}

	Ok(())
}
