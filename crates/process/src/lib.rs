//! Typed model intake from loose input.
//!
//! A [`Processor`] transforms raw input (by default into immutable
//! [`Map`](intake_structure::Map) / [`FixedList`](intake_structure::FixedList)
//! structures), resolves a [`BuildProcess`] or [`HydrateProcess`] either from
//! the caller or from a configured factory, and runs it.
//!
//! ```
//! use intake_process::{BuildProcess, Processor, ProcessError};
//! use intake_structure::Value;
//!
//! #[derive(Debug, PartialEq)]
//! struct Date {
//! 	year: i64,
//! }
//!
//! let builder = BuildProcess::from_fn(|input: &Value| {
//! 	Ok(Date {
//! 		year: input.as_map()?.field("year").as_int()?,
//! 	})
//! });
//!
//! let input = Value::from_json_str(r#"{"year": 1983}"#).map_err(ProcessError::building)?;
//! let date = Processor::new().process_for_type(input, Some(&builder), None, None)?;
//! assert_eq!(date, Date { year: 1983 });
//! # Ok::<(), ProcessError>(())
//! ```

/// Builder and hydrator contracts.
pub mod contract;
/// Processing errors.
pub mod error;
/// Builder and hydrator resolution.
pub mod factory;
/// Runtime model identification.
pub mod model;
/// Processor policy options.
pub mod options;
/// Plain/contextual process wrappers.
pub mod process;
/// The processor.
pub mod processor;
/// Input transformers.
pub mod transformer;

#[cfg(test)]
use serde_json as _;

pub use contract::{Builder, ContextualBuilder, ContextualHydrator, FallbackContext, Hydrator};
pub use error::{BoxError, ProcessError, ProcessRole, Result};
pub use factory::{
	AnyBuildProcess, AnyHydrateProcess, BuilderFactory, BuilderRegistry, HydratorFactory, HydratorRegistry,
};
pub use model::{ModelRef, ModelType};
pub use options::ProcessorOptions;
pub use process::{BuildProcess, HydrateProcess};
pub use processor::Processor;
pub use transformer::{PassthroughTransformer, StructureBuilderTransformer, Transformer};
