use std::any::TypeId;
use std::fmt;

use rustc_hash::FxHashMap as HashMap;

use super::{AnyBuildProcess, AnyHydrateProcess, BuilderFactory, HydratorFactory};
use crate::error::{ProcessError, Result};
use crate::model::{ModelRef, ModelType};
use crate::process::{BuildProcess, HydrateProcess};

type BuildEntry = Box<dyn Fn() -> AnyBuildProcess + Send + Sync>;
type HydrateEntry = Box<dyn Fn() -> AnyHydrateProcess + Send + Sync>;

/// Builder factory backed by builders registered per model type.
#[derive(Default)]
pub struct BuilderRegistry {
	by_type: HashMap<TypeId, (ModelType, BuildEntry)>,
}

impl BuilderRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers the builder for `M`, replacing any previous one.
	pub fn register<M: 'static>(&mut self, process: BuildProcess<M>) -> &mut Self {
		let model = ModelType::of::<M>();
		let entry: BuildEntry = Box::new(move || AnyBuildProcess::new(process.clone()));
		if self.by_type.insert(model.id(), (model, entry)).is_some() {
			tracing::debug!(model = model.name(), "replaced registered builder");
		}
		self
	}

	pub fn with<M: 'static>(mut self, process: BuildProcess<M>) -> Self {
		self.register(process);
		self
	}

	pub fn contains<M: 'static>(&self) -> bool {
		self.by_type.contains_key(&TypeId::of::<M>())
	}

	pub fn len(&self) -> usize {
		self.by_type.len()
	}

	pub fn is_empty(&self) -> bool {
		self.by_type.is_empty()
	}
}

impl BuilderFactory for BuilderRegistry {
	fn build_for_type(&self, ty: ModelType) -> Result<AnyBuildProcess> {
		self.by_type
			.get(&ty.id())
			.map(|(_, entry)| entry())
			.ok_or(ProcessError::BuilderNotRegistered { model: ty })
	}
}

impl fmt::Debug for BuilderRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set().entries(self.by_type.values().map(|(model, _)| model)).finish()
	}
}

/// Hydrator factory backed by hydrators registered per model type.
///
/// Resolution uses the runtime type of the instance being hydrated.
#[derive(Default)]
pub struct HydratorRegistry {
	by_type: HashMap<TypeId, (ModelType, HydrateEntry)>,
}

impl HydratorRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers the hydrator for `M`, replacing any previous one.
	pub fn register<M: 'static>(&mut self, process: HydrateProcess<M>) -> &mut Self {
		let model = ModelType::of::<M>();
		let entry: HydrateEntry = Box::new(move || AnyHydrateProcess::new(process.clone()));
		if self.by_type.insert(model.id(), (model, entry)).is_some() {
			tracing::debug!(model = model.name(), "replaced registered hydrator");
		}
		self
	}

	pub fn with<M: 'static>(mut self, process: HydrateProcess<M>) -> Self {
		self.register(process);
		self
	}

	pub fn contains<M: 'static>(&self) -> bool {
		self.by_type.contains_key(&TypeId::of::<M>())
	}

	pub fn len(&self) -> usize {
		self.by_type.len()
	}

	pub fn is_empty(&self) -> bool {
		self.by_type.is_empty()
	}
}

impl HydratorFactory for HydratorRegistry {
	fn build_for_model(&self, model: ModelRef<'_>) -> Result<AnyHydrateProcess> {
		let ty = model.ty();
		self.by_type
			.get(&ty.id())
			.map(|(_, entry)| entry())
			.ok_or(ProcessError::HydratorNotRegistered { model: ty })
	}
}

impl fmt::Debug for HydratorRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set().entries(self.by_type.values().map(|(model, _)| model)).finish()
	}
}
