use crate::value::{Value, ValueKind};

/// Errors raised while normalizing loose input into a [`Structure`](crate::Structure).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructureError {
	/// The value is neither an ordered key/value sequence nor a pair source.
	#[error("invalid structural type `{type_name}`")]
	InvalidStructuralType {
		/// Observed runtime type of the rejected value.
		type_name: &'static str,
	},

	/// Input nesting went deeper than the factory's configured budget.
	#[error("structure nesting exceeds the maximum depth of {max_depth}")]
	DepthExceeded { max_depth: usize },
}

impl StructureError {
	pub fn invalid_structural_type(value: &Value) -> Self {
		Self::InvalidStructuralType {
			type_name: value.type_name(),
		}
	}
}

/// Error returned by typed accessors like [`Value::as_map`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected}, got {got}")]
pub struct ValueTypeError {
	expected: ValueKind,
	got: &'static str,
}

impl ValueTypeError {
	pub fn new(expected: ValueKind, got: &Value) -> Self {
		Self {
			expected,
			got: got.type_name(),
		}
	}

	pub fn expected(&self) -> ValueKind {
		self.expected
	}

	pub fn got(&self) -> &'static str {
		self.got
	}
}
