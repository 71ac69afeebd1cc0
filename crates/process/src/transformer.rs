//! Input transformation applied before any builder or hydrator runs.

use std::fmt;
use std::sync::Arc;

use intake_structure::{RecursiveStructureFactory, StructureFactory, Value};

use crate::error::Result;

/// Converts raw input into the shape builders and hydrators consume.
pub trait Transformer: Send + Sync {
	fn transform(&self, input: Value) -> Result<Value>;
}

/// Hands input through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughTransformer;

impl Transformer for PassthroughTransformer {
	fn transform(&self, input: Value) -> Result<Value> {
		Ok(input)
	}
}

/// Normalizes input into an immutable [`Map`](intake_structure::Map) or
/// [`FixedList`](intake_structure::FixedList) tree.
#[derive(Clone)]
pub struct StructureBuilderTransformer {
	factory: Arc<dyn StructureFactory>,
}

impl StructureBuilderTransformer {
	pub fn new(factory: impl StructureFactory + 'static) -> Self {
		Self {
			factory: Arc::new(factory),
		}
	}

	pub fn structure_factory(&self) -> &Arc<dyn StructureFactory> {
		&self.factory
	}

	pub fn set_structure_factory(&mut self, factory: Arc<dyn StructureFactory>) -> &mut Self {
		self.factory = factory;
		self
	}
}

impl Default for StructureBuilderTransformer {
	fn default() -> Self {
		Self::new(RecursiveStructureFactory::new())
	}
}

impl Transformer for StructureBuilderTransformer {
	fn transform(&self, input: Value) -> Result<Value> {
		tracing::trace!(input = input.type_name(), "building structure from input");
		Ok(Value::from(self.factory.build(input)?))
	}
}

impl fmt::Debug for StructureBuilderTransformer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("StructureBuilderTransformer").finish_non_exhaustive()
	}
}
