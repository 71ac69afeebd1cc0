use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::Equivalent;

/// Scalar key of a loose input pair or a [`Map`](crate::Map) entry.
///
/// Only [`Key::Int`] counts as an integer key when classifying input; every
/// other variant turns the surrounding container into a map.
#[derive(Debug, Clone)]
pub enum Key {
	Int(i64),
	Str(String),
	Bool(bool),
	Float(f64),
}

impl Key {
	/// Normalizes an object key the way associative arrays do: canonical
	/// decimal integers (`"0"`, `"-12"`, but not `"007"` or `"-0"`) become
	/// [`Key::Int`], anything else stays a string.
	pub fn from_object_key(key: impl Into<String>) -> Self {
		let key = key.into();
		match key.parse::<i64>() {
			Ok(int) if int.to_string() == key => Self::Int(int),
			_ => Self::Str(key),
		}
	}

	pub fn is_int(&self) -> bool {
		matches!(self, Self::Int(_))
	}

	pub fn as_int(&self) -> Option<i64> {
		match self {
			Self::Int(int) => Some(*int),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Str(key) => Some(key),
			_ => None,
		}
	}

	/// Borrowed view used for lookups.
	pub fn as_key_ref(&self) -> KeyRef<'_> {
		match self {
			Self::Int(int) => KeyRef::Int(*int),
			Self::Str(key) => KeyRef::Str(key),
			Self::Bool(flag) => KeyRef::Bool(*flag),
			Self::Float(float) => KeyRef::Float(*float),
		}
	}

	pub fn type_name(&self) -> &'static str {
		match self {
			Self::Int(_) => "int",
			Self::Str(_) => "string",
			Self::Bool(_) => "bool",
			Self::Float(_) => "float",
		}
	}
}

impl PartialEq for Key {
	fn eq(&self, other: &Self) -> bool {
		self.as_key_ref() == other.as_key_ref()
	}
}

impl Eq for Key {}

impl Hash for Key {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.as_key_ref().hash(state);
	}
}

impl fmt::Display for Key {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.as_key_ref().fmt(f)
	}
}

impl PartialEq<str> for Key {
	fn eq(&self, other: &str) -> bool {
		self.as_str() == Some(other)
	}
}

impl PartialEq<&str> for Key {
	fn eq(&self, other: &&str) -> bool {
		self.as_str() == Some(*other)
	}
}

impl PartialEq<i64> for Key {
	fn eq(&self, other: &i64) -> bool {
		self.as_int() == Some(*other)
	}
}

impl From<i64> for Key {
	fn from(int: i64) -> Self {
		Self::Int(int)
	}
}

impl From<i32> for Key {
	fn from(int: i32) -> Self {
		Self::Int(int.into())
	}
}

impl From<usize> for Key {
	fn from(index: usize) -> Self {
		Self::Int(i64::try_from(index).unwrap_or(i64::MAX))
	}
}

impl From<bool> for Key {
	fn from(flag: bool) -> Self {
		Self::Bool(flag)
	}
}

impl From<f64> for Key {
	fn from(float: f64) -> Self {
		Self::Float(float)
	}
}

impl From<&str> for Key {
	fn from(key: &str) -> Self {
		Self::Str(key.to_owned())
	}
}

impl From<String> for Key {
	fn from(key: String) -> Self {
		Self::Str(key)
	}
}

impl From<KeyRef<'_>> for Key {
	fn from(key: KeyRef<'_>) -> Self {
		match key {
			KeyRef::Int(int) => Self::Int(int),
			KeyRef::Str(key) => Self::Str(key.to_owned()),
			KeyRef::Bool(flag) => Self::Bool(flag),
			KeyRef::Float(float) => Self::Float(float),
		}
	}
}

/// Borrowed form of [`Key`] accepted by every lookup method.
///
/// Floats compare and hash by bit pattern so that any key can be looked up,
/// including `NaN`.
#[derive(Debug, Clone, Copy)]
pub enum KeyRef<'a> {
	Int(i64),
	Str(&'a str),
	Bool(bool),
	Float(f64),
}

impl KeyRef<'_> {
	/// List offset addressed by this key, if it is a non-negative integer.
	pub fn as_index(&self) -> Option<usize> {
		match self {
			Self::Int(int) => usize::try_from(*int).ok(),
			_ => None,
		}
	}
}

impl PartialEq for KeyRef<'_> {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Int(a), Self::Int(b)) => a == b,
			(Self::Str(a), Self::Str(b)) => a == b,
			(Self::Bool(a), Self::Bool(b)) => a == b,
			(Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
			_ => false,
		}
	}
}

impl Eq for KeyRef<'_> {}

impl Hash for KeyRef<'_> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		match self {
			Self::Int(int) => (0u8, int).hash(state),
			Self::Str(key) => (1u8, key).hash(state),
			Self::Bool(flag) => (2u8, flag).hash(state),
			Self::Float(float) => (3u8, float.to_bits()).hash(state),
		}
	}
}

impl Equivalent<Key> for KeyRef<'_> {
	fn equivalent(&self, key: &Key) -> bool {
		*self == key.as_key_ref()
	}
}

impl fmt::Display for KeyRef<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Int(int) => write!(f, "{int}"),
			Self::Str(key) => f.write_str(key),
			Self::Bool(flag) => write!(f, "{flag}"),
			Self::Float(float) => write!(f, "{float}"),
		}
	}
}

impl<'a> From<&'a Key> for KeyRef<'a> {
	fn from(key: &'a Key) -> Self {
		key.as_key_ref()
	}
}

impl<'a> From<&'a str> for KeyRef<'a> {
	fn from(key: &'a str) -> Self {
		Self::Str(key)
	}
}

impl<'a> From<&'a String> for KeyRef<'a> {
	fn from(key: &'a String) -> Self {
		Self::Str(key)
	}
}

impl From<i64> for KeyRef<'_> {
	fn from(int: i64) -> Self {
		Self::Int(int)
	}
}

impl From<i32> for KeyRef<'_> {
	fn from(int: i32) -> Self {
		Self::Int(int.into())
	}
}

impl From<usize> for KeyRef<'_> {
	fn from(index: usize) -> Self {
		Self::Int(i64::try_from(index).unwrap_or(i64::MAX))
	}
}

impl From<bool> for KeyRef<'_> {
	fn from(flag: bool) -> Self {
		Self::Bool(flag)
	}
}

impl From<f64> for KeyRef<'_> {
	fn from(float: f64) -> Self {
		Self::Float(float)
	}
}
