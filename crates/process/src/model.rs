//! Runtime identification of model types and instances.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifies a model type by [`TypeId`], keeping its name for diagnostics.
#[derive(Clone, Copy)]
pub struct ModelType {
	id: TypeId,
	name: &'static str,
}

impl ModelType {
	pub fn of<M: 'static>() -> Self {
		Self {
			id: TypeId::of::<M>(),
			name: std::any::type_name::<M>(),
		}
	}

	pub fn id(&self) -> TypeId {
		self.id
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	pub fn is<M: 'static>(&self) -> bool {
		self.id == TypeId::of::<M>()
	}
}

impl PartialEq for ModelType {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for ModelType {}

impl Hash for ModelType {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state);
	}
}

impl fmt::Debug for ModelType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name)
	}
}

impl fmt::Display for ModelType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name)
	}
}

/// Borrowed, type-erased view of a model instance.
///
/// Hydrator factories receive this to pick a hydrator for the instance
/// about to be populated.
#[derive(Clone, Copy)]
pub struct ModelRef<'a> {
	model: &'a (dyn Any + Send + Sync),
	ty: ModelType,
}

impl<'a> ModelRef<'a> {
	pub fn new<M: Any + Send + Sync>(model: &'a M) -> Self {
		Self {
			model,
			ty: ModelType::of::<M>(),
		}
	}

	pub fn ty(&self) -> ModelType {
		self.ty
	}

	pub fn downcast_ref<M: Any>(&self) -> Option<&'a M> {
		self.model.downcast_ref()
	}
}

impl fmt::Debug for ModelRef<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ModelRef").field("ty", &self.ty).finish_non_exhaustive()
	}
}
