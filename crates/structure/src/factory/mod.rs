//! Recursive classification of loose input into [`Structure`] trees.
//!
//! A traversable value is scanned once. Any non-integer key turns the whole
//! level into a [`Map`]; otherwise it becomes a [`FixedList`] renumbered from
//! zero, with repeated offsets collapsed the same way a map collapses repeated
//! keys. Traversable values met during the scan are normalized in place
//! before the container is built, so a single pass per level yields a fully
//! normalized tree.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::error::StructureError;
use crate::{FixedList, Key, Map, Structure, Value};

#[cfg(test)]
mod tests;

/// Builds a [`Structure`] from loose, traversable input.
pub trait StructureFactory: Send + Sync {
	fn build(&self, data: Value) -> Result<Structure, StructureError>;
}

/// The default factory: normalizes every traversable value at every depth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecursiveStructureFactory {
	max_depth: Option<usize>,
}

impl RecursiveStructureFactory {
	/// Creates a factory bounded only by the input's own nesting.
	pub const fn new() -> Self {
		Self { max_depth: None }
	}

	/// Rejects input nested deeper than `max_depth` levels below the root.
	pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = Some(max_depth);
		self
	}

	pub fn max_depth(&self) -> Option<usize> {
		self.max_depth
	}

	fn build_level(&self, data: Value, depth: usize) -> Result<Structure, StructureError> {
		if let Some(max_depth) = self.max_depth
			&& depth > max_depth
		{
			return Err(StructureError::DepthExceeded { max_depth });
		}

		let pairs = traversable_pairs(data)?;
		let mut is_map = false;
		let mut normalized = Vec::with_capacity(pairs.len());

		for (key, value) in pairs {
			is_map = is_map || !key.is_int();

			let value = if value.is_traversable() {
				Value::from(self.build_level(value, depth + 1)?)
			} else {
				value
			};
			normalized.push((key, value));
		}

		tracing::trace!(depth, items = normalized.len(), kind = if is_map { "map" } else { "list" }, "classified structure");

		if is_map {
			return Ok(Structure::Map(Map::from_pairs(normalized)));
		}

		// Repeated offsets collapse like map keys: first position, last value.
		let mut items: IndexMap<i64, Value, FxBuildHasher> = IndexMap::with_capacity_and_hasher(normalized.len(), FxBuildHasher);
		for (key, value) in normalized {
			if let Key::Int(offset) = key {
				items.insert(offset, value);
			}
		}
		Ok(Structure::List(items.into_values().collect::<FixedList>()))
	}
}

impl StructureFactory for RecursiveStructureFactory {
	fn build(&self, data: Value) -> Result<Structure, StructureError> {
		self.build_level(data, 0)
	}
}

/// Drains a traversable value into its key/value pairs.
fn traversable_pairs(data: Value) -> Result<Vec<(Key, Value)>, StructureError> {
	match data {
		Value::Array(pairs) => Ok(pairs),
		Value::Pairs(source) => Ok(source.pairs().collect()),
		Value::Map(map) => Ok(map.into_pairs()),
		Value::List(list) => Ok(list.into_pairs()),
		other => Err(StructureError::invalid_structural_type(&other)),
	}
}
