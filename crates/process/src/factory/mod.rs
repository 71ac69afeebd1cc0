//! Resolution of builders by model type and hydrators by model instance.

use std::any::Any;
use std::fmt;

use crate::error::Result;
use crate::model::{ModelRef, ModelType};
use crate::process::{BuildProcess, HydrateProcess};

mod registry;


pub use registry::{BuilderRegistry, HydratorRegistry};

/// Resolves a builder for a model type.
pub trait BuilderFactory: Send + Sync {
	fn build_for_type(&self, ty: ModelType) -> Result<AnyBuildProcess>;
}

/// Resolves a hydrator for a model instance.
pub trait HydratorFactory: Send + Sync {
	fn build_for_model(&self, model: ModelRef<'_>) -> Result<AnyHydrateProcess>;
}

/// A [`BuildProcess`] with its model type erased.
pub struct AnyBuildProcess {
	model: ModelType,
	process: Box<dyn Any + Send + Sync>,
}

impl AnyBuildProcess {
	pub fn new<M: 'static>(process: BuildProcess<M>) -> Self {
		Self {
			model: ModelType::of::<M>(),
			process: Box::new(process),
		}
	}

	/// Model type the wrapped process builds.
	pub fn model(&self) -> ModelType {
		self.model
	}

	/// Recovers the typed process, or returns `self` when `M` does not match.
	pub fn downcast<M: 'static>(self) -> Result<BuildProcess<M>, Self> {
		let model = self.model;
		match self.process.downcast::<BuildProcess<M>>() {
			Ok(process) => Ok(*process),
			Err(process) => Err(Self { model, process }),
		}
	}
}

impl<M: 'static> From<BuildProcess<M>> for AnyBuildProcess {
	fn from(process: BuildProcess<M>) -> Self {
		Self::new(process)
	}
}

impl fmt::Debug for AnyBuildProcess {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AnyBuildProcess").field("model", &self.model).finish_non_exhaustive()
	}
}

/// A [`HydrateProcess`] with its model type erased.
pub struct AnyHydrateProcess {
	model: ModelType,
	process: Box<dyn Any + Send + Sync>,
}

impl AnyHydrateProcess {
	pub fn new<M: 'static>(process: HydrateProcess<M>) -> Self {
		Self {
			model: ModelType::of::<M>(),
			process: Box::new(process),
		}
	}

	/// Model type the wrapped process hydrates.
	pub fn model(&self) -> ModelType {
		self.model
	}

	/// Recovers the typed process, or returns `self` when `M` does not match.
	pub fn downcast<M: 'static>(self) -> Result<HydrateProcess<M>, Self> {
		let model = self.model;
		match self.process.downcast::<HydrateProcess<M>>() {
			Ok(process) => Ok(*process),
			Err(process) => Err(Self { model, process }),
		}
	}
}

impl<M: 'static> From<HydrateProcess<M>> for AnyHydrateProcess {
	fn from(process: HydrateProcess<M>) -> Self {
		Self::new(process)
	}
}

impl fmt::Debug for AnyHydrateProcess {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AnyHydrateProcess").field("model", &self.model).finish_non_exhaustive()
	}
}
