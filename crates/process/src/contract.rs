//! Builder and hydrator contracts.
//!
//! Closures with a matching signature implement each contract directly, so
//! a strongly-typed function can be used anywhere a builder or hydrator is
//! expected.

use intake_structure::{Map, Value};

use crate::error::Result;

/// Instantiates a new model from processed input.
pub trait Builder<M>: Send + Sync {
	fn build(&self, input: &Value) -> Result<M>;
}

/// A [`Builder`] that also receives the caller's context.
pub trait ContextualBuilder<M>: Send + Sync {
	fn build(&self, input: &Value, context: Option<&Map>) -> Result<M>;
}

/// Populates an existing model from processed input.
pub trait Hydrator<M>: Send + Sync {
	fn hydrate(&self, input: &Value, model: M) -> Result<M>;
}

/// A [`Hydrator`] that also receives the caller's context.
pub trait ContextualHydrator<M>: Send + Sync {
	fn hydrate(&self, input: &Value, model: M, context: Option<&Map>) -> Result<M>;
}

impl<M, F> Builder<M> for F
where
	F: Fn(&Value) -> Result<M> + Send + Sync,
{
	fn build(&self, input: &Value) -> Result<M> {
		self(input)
	}
}

impl<M, F> ContextualBuilder<M> for F
where
	F: Fn(&Value, Option<&Map>) -> Result<M> + Send + Sync,
{
	fn build(&self, input: &Value, context: Option<&Map>) -> Result<M> {
		self(input, context)
	}
}

impl<M, F> Hydrator<M> for F
where
	F: Fn(&Value, M) -> Result<M> + Send + Sync,
{
	fn hydrate(&self, input: &Value, model: M) -> Result<M> {
		self(input, model)
	}
}

impl<M, F> ContextualHydrator<M> for F
where
	F: Fn(&Value, M, Option<&Map>) -> Result<M> + Send + Sync,
{
	fn hydrate(&self, input: &Value, model: M, context: Option<&Map>) -> Result<M> {
		self(input, model, context)
	}
}

/// Hands an empty context to the wrapped process when the caller supplies
/// none, so the inner process never observes `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackContext<P> {
	inner: P,
}

impl<P> FallbackContext<P> {
	pub fn new(inner: P) -> Self {
		Self { inner }
	}

	pub fn inner(&self) -> &P {
		&self.inner
	}

	pub fn into_inner(self) -> P {
		self.inner
	}
}

impl<M, P: ContextualBuilder<M>> ContextualBuilder<M> for FallbackContext<P> {
	fn build(&self, input: &Value, context: Option<&Map>) -> Result<M> {
		match context {
			Some(context) => self.inner.build(input, Some(context)),
			None => self.inner.build(input, Some(&Map::new())),
		}
	}
}

impl<M, P: ContextualHydrator<M>> ContextualHydrator<M> for FallbackContext<P> {
	fn hydrate(&self, input: &Value, model: M, context: Option<&Map>) -> Result<M> {
		match context {
			Some(context) => self.inner.hydrate(input, model, Some(context)),
			None => self.inner.hydrate(input, model, Some(&Map::new())),
		}
	}
}
