//! Registered builders and hydrators, tagged by whether they accept context.

use std::fmt;
use std::sync::Arc;

use intake_structure::{Map, Value};

use crate::contract::{Builder, ContextualBuilder, ContextualHydrator, Hydrator};
use crate::error::Result;

/// A builder for `M`, either plain or context-aware.
///
/// Whether a builder accepts context is fixed when it is wrapped here, so
/// the processor never has to inspect a builder at run time.
pub enum BuildProcess<M> {
	Plain(Arc<dyn Builder<M>>),
	Contextual(Arc<dyn ContextualBuilder<M>>),
}

impl<M: 'static> BuildProcess<M> {
	pub fn plain(builder: impl Builder<M> + 'static) -> Self {
		Self::Plain(Arc::new(builder))
	}

	pub fn contextual(builder: impl ContextualBuilder<M> + 'static) -> Self {
		Self::Contextual(Arc::new(builder))
	}

	/// Wraps a plain building function.
	pub fn from_fn<F>(f: F) -> Self
	where
		F: Fn(&Value) -> Result<M> + Send + Sync + 'static,
	{
		Self::Plain(Arc::new(f))
	}

	/// Wraps a building function that receives the caller's context.
	pub fn contextual_fn<F>(f: F) -> Self
	where
		F: Fn(&Value, Option<&Map>) -> Result<M> + Send + Sync + 'static,
	{
		Self::Contextual(Arc::new(f))
	}
}

impl<M> BuildProcess<M> {
	pub fn is_contextual(&self) -> bool {
		matches!(self, Self::Contextual(_))
	}

	/// Runs the builder. Plain builders never see `context`.
	pub(crate) fn run(&self, input: &Value, context: Option<&Map>) -> Result<M> {
		match self {
			Self::Plain(builder) => builder.build(input),
			Self::Contextual(builder) => builder.build(input, context),
		}
	}
}

impl<M> Clone for BuildProcess<M> {
	fn clone(&self) -> Self {
		match self {
			Self::Plain(builder) => Self::Plain(Arc::clone(builder)),
			Self::Contextual(builder) => Self::Contextual(Arc::clone(builder)),
		}
	}
}

impl<M> fmt::Debug for BuildProcess<M> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("BuildProcess")
			.field(&if self.is_contextual() { "contextual" } else { "plain" })
			.finish()
	}
}

/// A hydrator for `M`, either plain or context-aware.
pub enum HydrateProcess<M> {
	Plain(Arc<dyn Hydrator<M>>),
	Contextual(Arc<dyn ContextualHydrator<M>>),
}

impl<M: 'static> HydrateProcess<M> {
	pub fn plain(hydrator: impl Hydrator<M> + 'static) -> Self {
		Self::Plain(Arc::new(hydrator))
	}

	pub fn contextual(hydrator: impl ContextualHydrator<M> + 'static) -> Self {
		Self::Contextual(Arc::new(hydrator))
	}

	/// Wraps a plain hydrating function.
	pub fn from_fn<F>(f: F) -> Self
	where
		F: Fn(&Value, M) -> Result<M> + Send + Sync + 'static,
	{
		Self::Plain(Arc::new(f))
	}

	/// Wraps a hydrating function that receives the caller's context.
	pub fn contextual_fn<F>(f: F) -> Self
	where
		F: Fn(&Value, M, Option<&Map>) -> Result<M> + Send + Sync + 'static,
	{
		Self::Contextual(Arc::new(f))
	}
}

impl<M> HydrateProcess<M> {
	pub fn is_contextual(&self) -> bool {
		matches!(self, Self::Contextual(_))
	}

	/// Runs the hydrator. Plain hydrators never see `context`.
	pub(crate) fn run(&self, input: &Value, model: M, context: Option<&Map>) -> Result<M> {
		match self {
			Self::Plain(hydrator) => hydrator.hydrate(input, model),
			Self::Contextual(hydrator) => hydrator.hydrate(input, model, context),
		}
	}
}

impl<M> Clone for HydrateProcess<M> {
	fn clone(&self) -> Self {
		match self {
			Self::Plain(hydrator) => Self::Plain(Arc::clone(hydrator)),
			Self::Contextual(hydrator) => Self::Contextual(Arc::clone(hydrator)),
		}
	}
}

impl<M> fmt::Debug for HydrateProcess<M> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("HydrateProcess")
			.field(&if self.is_contextual() { "contextual" } else { "plain" })
			.finish()
	}
}
