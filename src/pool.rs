use std::{fmt, marker::PhantomData};

pub struct Handle<T> {
	type_marker: PhantomData<T>,
	pub index: usize,
	pub generation: u32
}

impl<T> Clone for Handle<T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
	fn eq(&self, other: &Self) -> bool {
		self.index == other.index && self.generation == other.generation
	}
}

impl<T> Eq for Handle<T> {}

impl<T> fmt::Debug for Handle<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Handle({}v{})", self.index, self.generation)
	}
}

impl<T> Handle<T> {
	fn new(index: usize, generation: u32) -> Self {
		Self {
			type_marker: PhantomData,
			index,
			generation
		}
	}
}

struct Record<T> {
	generation: u32,
	payload: Option<T>
}

pub struct Pool<T> {
	records: Vec<Record<T>>,
	vacant_records: Vec<usize>
}

impl<T> Pool<T> {
	pub fn new() -> Self {
		Self {
			records: vec![],
			vacant_records: vec![]
		}
	}

	pub fn add(&mut self, payload: T) -> Handle<T> {
		if let Some(index) = self.vacant_records.pop() {
			let record = &mut self.records[index];
			record.generation = record.generation.wrapping_add(1);
			record.payload = Some(payload);

			Handle::new(index, record.generation)
		}
		else {
			self.records.push(Record {
				generation: 0,
				payload: Some(payload)
			});

			Handle::new(self.records.len() - 1, 0)
		}
	}

	pub fn valid(&self, handle: Handle<T>) -> bool {
		self.get(handle).is_some()
	}

	pub fn remove(&mut self, handle: Handle<T>) -> Option<T> {
		let record = self.records.get_mut(handle.index)?;

		if record.generation != handle.generation {
			return None;
		}

		let payload = record.payload.take()?;
		self.vacant_records.push(handle.index);
		Some(payload)
	}

	pub fn get(&self, handle: Handle<T>) -> Option<&T> {
		self.records.get(handle.index)
			.filter(|record| record.generation == handle.generation)
			.and_then(|record| record.payload.as_ref())
	}

	pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
		self.records.get_mut(handle.index)
			.filter(|record| record.generation == handle.generation)
			.and_then(|record| record.payload.as_mut())
	}

	pub fn present_len(&self) -> usize {
		self.records.len() - self.vacant_records.len()
	}
}

impl<T> Default for Pool<T> {
	fn default() -> Self {
		Self::new()
	}
}
