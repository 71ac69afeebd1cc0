//! Value model shared by loose input and normalized structures.
//!
//! Loose input arrives as [`Value::Array`] (an ordered key/value sequence,
//! the shape of decoded JSON) or [`Value::Pairs`] (a lazily produced
//! sequence). Normalization replaces both with [`Value::Map`] and
//! [`Value::List`]; scalars and [`Value::Opaque`] leaves pass through.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::ValueTypeError;
use crate::{FixedList, Key, Map, Structure};

/// A re-iterable source of key/value pairs.
///
/// This is the lazy counterpart of [`Value::Array`]: the structure factory
/// treats both as traversable and walks the produced pairs exactly once per
/// build.
pub trait Traversable: fmt::Debug + Send + Sync {
	fn pairs(&self) -> Box<dyn Iterator<Item = (Key, Value)> + '_>;

	/// Runtime type name reported in diagnostics.
	fn type_name(&self) -> &'static str {
		std::any::type_name::<Self>()
	}
}

/// An application object carried through the value tree untouched.
#[derive(Clone)]
pub struct Opaque {
	type_name: &'static str,
	inner: Arc<dyn Any + Send + Sync>,
}

impl Opaque {
	pub fn new<T: Any + Send + Sync>(value: T) -> Self {
		Self {
			type_name: std::any::type_name::<T>(),
			inner: Arc::new(value),
		}
	}

	pub fn type_name(&self) -> &'static str {
		self.type_name
	}

	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		self.inner.downcast_ref()
	}

	/// Whether both handles point at the same object.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}
}

impl fmt::Debug for Opaque {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Opaque").field(&self.type_name).finish()
	}
}

/// Loose or normalized data.
#[derive(Debug, Clone, Default)]
pub enum Value {
	#[default]
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	String(String),
	/// Ordered key/value sequence.
	Array(Vec<(Key, Value)>),
	/// Lazily produced key/value sequence.
	Pairs(Arc<dyn Traversable>),
	Map(Map),
	List(FixedList),
	Opaque(Opaque),
}

pub(crate) static NULL: Value = Value::Null;

impl Value {
	/// Builds a loose array from key/value pairs.
	pub fn array<K, I>(pairs: I) -> Self
	where
		K: Into<Key>,
		I: IntoIterator<Item = (K, Value)>,
	{
		Self::Array(pairs.into_iter().map(|(key, value)| (key.into(), value)).collect())
	}

	/// Builds a loose array keyed `0..n`.
	pub fn sequence<I>(values: I) -> Self
	where
		I: IntoIterator<Item = Value>,
	{
		Self::Array(values.into_iter().enumerate().map(|(index, value)| (Key::from(index), value)).collect())
	}

	pub fn pairs(source: impl Traversable + 'static) -> Self {
		Self::Pairs(Arc::new(source))
	}

	pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
		Self::Opaque(Opaque::new(value))
	}

	pub fn kind(&self) -> ValueKind {
		match self {
			Self::Null => ValueKind::Null,
			Self::Bool(_) => ValueKind::Bool,
			Self::Int(_) => ValueKind::Int,
			Self::Float(_) => ValueKind::Float,
			Self::String(_) => ValueKind::String,
			Self::Array(_) => ValueKind::Array,
			Self::Pairs(_) => ValueKind::Pairs,
			Self::Map(_) => ValueKind::Map,
			Self::List(_) => ValueKind::List,
			Self::Opaque(_) => ValueKind::Opaque,
		}
	}

	/// Observed runtime type, as reported in errors.
	///
	/// Identical to [`Value::kind`] except for opaque values and pair
	/// sources, which report their concrete Rust type.
	pub fn type_name(&self) -> &'static str {
		match self {
			Self::Pairs(source) => source.type_name(),
			Self::Opaque(opaque) => opaque.type_name(),
			other => other.kind().as_str(),
		}
	}

	/// Whether the structure factory can iterate this value.
	pub fn is_traversable(&self) -> bool {
		matches!(self, Self::Array(_) | Self::Pairs(_) | Self::Map(_) | Self::List(_))
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	pub fn as_bool(&self) -> Result<bool, ValueTypeError> {
		match self {
			Self::Bool(val) => Ok(*val),
			other => Err(ValueTypeError::new(ValueKind::Bool, other)),
		}
	}

	pub fn as_int(&self) -> Result<i64, ValueTypeError> {
		match self {
			Self::Int(val) => Ok(*val),
			other => Err(ValueTypeError::new(ValueKind::Int, other)),
		}
	}

	pub fn as_float(&self) -> Result<f64, ValueTypeError> {
		match self {
			Self::Float(val) => Ok(*val),
			other => Err(ValueTypeError::new(ValueKind::Float, other)),
		}
	}

	pub fn as_str(&self) -> Result<&str, ValueTypeError> {
		match self {
			Self::String(val) => Ok(val),
			other => Err(ValueTypeError::new(ValueKind::String, other)),
		}
	}

	pub fn as_map(&self) -> Result<&Map, ValueTypeError> {
		match self {
			Self::Map(map) => Ok(map),
			other => Err(ValueTypeError::new(ValueKind::Map, other)),
		}
	}

	pub fn as_list(&self) -> Result<&FixedList, ValueTypeError> {
		match self {
			Self::List(list) => Ok(list),
			other => Err(ValueTypeError::new(ValueKind::List, other)),
		}
	}

	pub fn as_opaque(&self) -> Result<&Opaque, ValueTypeError> {
		match self {
			Self::Opaque(opaque) => Ok(opaque),
			other => Err(ValueTypeError::new(ValueKind::Opaque, other)),
		}
	}

	pub fn into_structure(self) -> Result<Structure, Self> {
		match self {
			Self::Map(map) => Ok(Structure::Map(map)),
			Self::List(list) => Ok(Structure::List(list)),
			other => Err(other),
		}
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Null, Self::Null) => true,
			(Self::Bool(a), Self::Bool(b)) => a == b,
			(Self::Int(a), Self::Int(b)) => a == b,
			(Self::Float(a), Self::Float(b)) => a == b,
			(Self::String(a), Self::String(b)) => a == b,
			(Self::Array(a), Self::Array(b)) => a == b,
			(Self::Pairs(a), Self::Pairs(b)) => Arc::ptr_eq(a, b),
			(Self::Map(a), Self::Map(b)) => a == b,
			(Self::List(a), Self::List(b)) => a == b,
			(Self::Opaque(a), Self::Opaque(b)) => a.ptr_eq(b),
			_ => false,
		}
	}
}

impl From<bool> for Value {
	fn from(val: bool) -> Self {
		Self::Bool(val)
	}
}

impl From<i64> for Value {
	fn from(val: i64) -> Self {
		Self::Int(val)
	}
}

impl From<i32> for Value {
	fn from(val: i32) -> Self {
		Self::Int(val.into())
	}
}

impl From<f64> for Value {
	fn from(val: f64) -> Self {
		Self::Float(val)
	}
}

impl From<&str> for Value {
	fn from(val: &str) -> Self {
		Self::String(val.to_owned())
	}
}

impl From<String> for Value {
	fn from(val: String) -> Self {
		Self::String(val)
	}
}

impl From<Map> for Value {
	fn from(map: Map) -> Self {
		Self::Map(map)
	}
}

impl From<FixedList> for Value {
	fn from(list: FixedList) -> Self {
		Self::List(list)
	}
}

impl From<Structure> for Value {
	fn from(structure: Structure) -> Self {
		match structure {
			Structure::Map(map) => Self::Map(map),
			Structure::List(list) => Self::List(list),
		}
	}
}

impl From<Opaque> for Value {
	fn from(opaque: Opaque) -> Self {
		Self::Opaque(opaque)
	}
}

/// Coarse value type used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
	Null,
	Bool,
	Int,
	Float,
	String,
	Array,
	Pairs,
	Map,
	List,
	Opaque,
}

impl ValueKind {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool => "bool",
			Self::Int => "int",
			Self::Float => "float",
			Self::String => "string",
			Self::Array => "array",
			Self::Pairs => "pairs",
			Self::Map => "map",
			Self::List => "list",
			Self::Opaque => "opaque",
		}
	}
}

impl fmt::Display for ValueKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
