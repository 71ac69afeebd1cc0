use std::fmt;

use intake_structure::{StructureError, ValueTypeError};

use crate::model::ModelType;

/// Boxed error returned by application builders and hydrators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias for processing operations.
pub type Result<T, E = ProcessError> = std::result::Result<T, E>;

/// Which half of a processing run an error relates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessRole {
	Builder,
	Hydrator,
}

impl fmt::Display for ProcessRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Builder => "builder",
			Self::Hydrator => "hydrator",
		})
	}
}

/// Errors raised while transforming, resolving, building or hydrating.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
	/// The transformer could not normalize the input.
	#[error(transparent)]
	Structure(#[from] StructureError),
	/// A builder or hydrator read a value of the wrong kind.
	#[error(transparent)]
	Value(#[from] ValueTypeError),
	/// No builder was supplied and no builder factory is configured.
	#[error("no builder supplied for `{model}` and no builder factory configured")]
	UnresolvableBuilder {
		/// Model type the builder was needed for.
		model: ModelType,
	},
	/// No hydrator was supplied and no hydrator factory is configured.
	#[error("no hydrator supplied for `{model}` and no hydrator factory configured")]
	UnresolvableHydrator {
		/// Model type the hydrator was needed for.
		model: ModelType,
	},
	/// The builder factory has nothing registered for the model type.
	#[error("no builder registered for `{model}`")]
	BuilderNotRegistered { model: ModelType },
	/// The hydrator factory has nothing registered for the model type.
	#[error("no hydrator registered for `{model}`")]
	HydratorNotRegistered { model: ModelType },
	/// A factory resolved a process for a different model type.
	#[error("{role} factory returned a process for `{actual}`, expected `{model}`")]
	ProcessTypeMismatch {
		role: ProcessRole,
		/// Model type that was requested.
		model: ModelType,
		/// Model type the returned process handles.
		actual: ModelType,
	},
	/// Context was supplied to a process that cannot accept it while the
	/// processor requires compatibility.
	#[error("context was provided but the {role} does not accept context")]
	IncompatibleProcess { role: ProcessRole },
	/// A builder failed.
	#[error("building failed")]
	Building(#[source] BoxError),
	/// A hydrator failed.
	#[error("hydration failed")]
	Hydration(#[source] BoxError),
	/// Processor options could not be parsed.
	#[error("invalid processor options: {0}")]
	Options(#[from] toml::de::Error),
}

impl ProcessError {
	/// Wraps an application error raised while building.
	pub fn building(err: impl Into<BoxError>) -> Self {
		Self::Building(err.into())
	}

	/// Wraps an application error raised while hydrating.
	pub fn hydration(err: impl Into<BoxError>) -> Self {
		Self::Hydration(err.into())
	}
}
