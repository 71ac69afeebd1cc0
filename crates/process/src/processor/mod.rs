//! The processor: transform, resolve, then build and/or hydrate.
//!
//! Every call is independent. Input is transformed once, a builder or
//! hydrator is taken from the caller or resolved through the configured
//! factory, and the same transformed input is handed to both halves when a
//! build is followed by hydration.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use intake_structure::{Map, Value};

use crate::error::{ProcessError, ProcessRole, Result};
use crate::factory::{BuilderFactory, HydratorFactory};
use crate::model::{ModelRef, ModelType};
use crate::options::ProcessorOptions;
use crate::process::{BuildProcess, HydrateProcess};
use crate::transformer::{StructureBuilderTransformer, Transformer};


/// Builds and hydrates models from loose input.
///
/// Configure through the setters or `with_*` builders, then share the
/// processor freely: processing only takes `&self`.
#[derive(Clone)]
pub struct Processor {
	transformer: Arc<dyn Transformer>,
	builder_factory: Option<Arc<dyn BuilderFactory>>,
	hydrator_factory: Option<Arc<dyn HydratorFactory>>,
	options: ProcessorOptions,
}

impl Default for Processor {
	fn default() -> Self {
		Self {
			transformer: Arc::new(StructureBuilderTransformer::default()),
			builder_factory: None,
			hydrator_factory: None,
			options: ProcessorOptions::default(),
		}
	}
}

impl Processor {
	/// Creates a processor that normalizes input into structures and has no
	/// factories configured.
	pub fn new() -> Self {
		Self::default()
	}

	pub fn transformer(&self) -> &Arc<dyn Transformer> {
		&self.transformer
	}

	pub fn set_transformer(&mut self, transformer: Arc<dyn Transformer>) -> &mut Self {
		self.transformer = transformer;
		self
	}

	pub fn with_transformer(mut self, transformer: impl Transformer + 'static) -> Self {
		self.transformer = Arc::new(transformer);
		self
	}

	pub fn builder_factory(&self) -> Option<&Arc<dyn BuilderFactory>> {
		self.builder_factory.as_ref()
	}

	pub fn set_builder_factory(&mut self, factory: Option<Arc<dyn BuilderFactory>>) -> &mut Self {
		self.builder_factory = factory;
		self
	}

	pub fn with_builder_factory(mut self, factory: impl BuilderFactory + 'static) -> Self {
		self.builder_factory = Some(Arc::new(factory));
		self
	}

	pub fn hydrator_factory(&self) -> Option<&Arc<dyn HydratorFactory>> {
		self.hydrator_factory.as_ref()
	}

	pub fn set_hydrator_factory(&mut self, factory: Option<Arc<dyn HydratorFactory>>) -> &mut Self {
		self.hydrator_factory = factory;
		self
	}

	pub fn with_hydrator_factory(mut self, factory: impl HydratorFactory + 'static) -> Self {
		self.hydrator_factory = Some(Arc::new(factory));
		self
	}

	pub fn always_hydrate_after_building(&self) -> bool {
		self.options.always_hydrate_after_building
	}

	pub fn set_always_hydrate_after_building(&mut self, enabled: bool) -> &mut Self {
		self.options.always_hydrate_after_building = enabled;
		self
	}

	pub fn require_contextual_processing_compatibility(&self) -> bool {
		self.options.require_contextual_processing_compatibility
	}

	pub fn set_require_contextual_processing_compatibility(&mut self, required: bool) -> &mut Self {
		self.options.require_contextual_processing_compatibility = required;
		self
	}

	pub fn options(&self) -> ProcessorOptions {
		self.options
	}

	pub fn set_options(&mut self, options: ProcessorOptions) -> &mut Self {
		self.options = options;
		self
	}

	pub fn with_options(mut self, options: ProcessorOptions) -> Self {
		self.options = options;
		self
	}

	/// Hydrates an existing `model` from `input`.
	///
	/// Without an explicit `hydrator`, one is resolved from the hydrator
	/// factory using the model instance.
	pub fn process_for_model<M>(
		&self,
		input: Value,
		model: M,
		hydrator: Option<&HydrateProcess<M>>,
		context: Option<&Map>,
	) -> Result<M>
	where
		M: Any + Send + Sync,
	{
		let input = self.transformer.transform(input)?;
		self.hydrate(&input, model, hydrator, context)
	}

	/// Builds a new `M` from `input`, then hydrates it when a hydrator is
	/// supplied or [`always_hydrate_after_building`](Self::always_hydrate_after_building)
	/// is set.
	///
	/// A failed build returns before any hydrator is resolved or run.
	pub fn process_for_type<M>(
		&self,
		input: Value,
		builder: Option<&BuildProcess<M>>,
		hydrator: Option<&HydrateProcess<M>>,
		context: Option<&Map>,
	) -> Result<M>
	where
		M: Any + Send + Sync,
	{
		let input = self.transformer.transform(input)?;

		let resolved;
		let builder = match builder {
			Some(builder) => builder,
			None => {
				resolved = self.resolve_builder::<M>()?;
				&resolved
			}
		};

		self.check_compatibility(ProcessRole::Builder, builder.is_contextual(), context)?;
		let model = builder.run(&input, context)?;

		if hydrator.is_some() || self.options.always_hydrate_after_building {
			tracing::debug!(model = std::any::type_name::<M>(), "hydrating built model");
			return self.hydrate(&input, model, hydrator, context);
		}
		Ok(model)
	}

	fn hydrate<M>(&self, input: &Value, model: M, hydrator: Option<&HydrateProcess<M>>, context: Option<&Map>) -> Result<M>
	where
		M: Any + Send + Sync,
	{
		let resolved;
		let hydrator = match hydrator {
			Some(hydrator) => hydrator,
			None => {
				resolved = self.resolve_hydrator(&model)?;
				&resolved
			}
		};

		self.check_compatibility(ProcessRole::Hydrator, hydrator.is_contextual(), context)?;
		hydrator.run(input, model, context)
	}

	fn resolve_builder<M: 'static>(&self) -> Result<BuildProcess<M>> {
		let model = ModelType::of::<M>();
		let factory = self
			.builder_factory
			.as_ref()
			.ok_or(ProcessError::UnresolvableBuilder { model })?;

		tracing::debug!(model = model.name(), "resolving builder from factory");
		factory
			.build_for_type(model)?
			.downcast::<M>()
			.map_err(|process| ProcessError::ProcessTypeMismatch {
				role: ProcessRole::Builder,
				model,
				actual: process.model(),
			})
	}

	fn resolve_hydrator<M>(&self, instance: &M) -> Result<HydrateProcess<M>>
	where
		M: Any + Send + Sync,
	{
		let model = ModelType::of::<M>();
		let factory = self
			.hydrator_factory
			.as_ref()
			.ok_or(ProcessError::UnresolvableHydrator { model })?;

		tracing::debug!(model = model.name(), "resolving hydrator from factory");
		factory
			.build_for_model(ModelRef::new(instance))?
			.downcast::<M>()
			.map_err(|process| ProcessError::ProcessTypeMismatch {
				role: ProcessRole::Hydrator,
				model,
				actual: process.model(),
			})
	}

	/// Rejects context for a process that cannot accept it when the policy
	/// requires compatibility. Otherwise the context is simply not passed.
	fn check_compatibility(&self, role: ProcessRole, contextual: bool, context: Option<&Map>) -> Result<()> {
		if context.is_none() || contextual {
			return Ok(());
		}
		if self.options.require_contextual_processing_compatibility {
			tracing::warn!(%role, "context provided to a process that does not accept it");
			return Err(ProcessError::IncompatibleProcess { role });
		}
		tracing::debug!(%role, "dropping context for non-contextual process");
		Ok(())
	}
}

impl fmt::Debug for Processor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Processor")
			.field("builder_factory", &self.builder_factory.is_some())
			.field("hydrator_factory", &self.hydrator_factory.is_some())
			.field("options", &self.options)
			.finish_non_exhaustive()
	}
}
