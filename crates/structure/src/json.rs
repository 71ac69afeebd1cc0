//! Interop with decoded JSON and `serde` serialization of normalized trees.

use rustc_hash::FxHashSet;
use serde::ser::{Error as _, Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::{FixedList, Key, Map, Structure, Value};

impl Value {
	/// Decodes a JSON document into loose input.
	///
	/// Object keys are normalized with [`Key::from_object_key`]; arrays are
	/// keyed by position.
	pub fn from_json_str(input: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str::<serde_json::Value>(input).map(Self::from)
	}
}

/// Integers that fit `i64` become [`Value::Int`]. Larger unsigned integers
/// (above `i64::MAX`) and all other numbers become [`Value::Float`], so those
/// big integers lose precision.
impl From<serde_json::Value> for Value {
	fn from(value: serde_json::Value) -> Self {
		match value {
			serde_json::Value::Null => Self::Null,
			serde_json::Value::Bool(val) => Self::Bool(val),
			serde_json::Value::Number(number) => match number.as_i64() {
				Some(int) => Self::Int(int),
				None => number.as_f64().map_or(Self::Null, Self::Float),
			},
			serde_json::Value::String(val) => Self::String(val),
			serde_json::Value::Array(items) => Self::sequence(items.into_iter().map(Self::from)),
			serde_json::Value::Object(object) => {
				Self::Array(object.into_iter().map(|(key, value)| (Key::from_object_key(key), Self::from(value))).collect())
			}
		}
	}
}

impl Serialize for Key {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

/// Serializes entries as an object keyed by each key's display form.
///
/// Distinct keys that print the same (`Key::Int(0)` and `Key::Str("0")`)
/// would collide in the output object and are rejected instead.
fn serialize_entries<'a, S, I>(serializer: S, len: usize, entries: I) -> Result<S::Ok, S::Error>
where
	S: Serializer,
	I: IntoIterator<Item = (&'a Key, &'a Value)>,
{
	let mut seen = FxHashSet::default();
	let mut map = serializer.serialize_map(Some(len))?;
	for (key, value) in entries {
		let name = key.to_string();
		if !seen.insert(name) {
			return Err(S::Error::custom(format_args!("duplicate object key `{key}` after stringification")));
		}
		map.serialize_entry(key, value)?;
	}
	map.end()
}

impl Serialize for Map {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serialize_entries(serializer, self.len(), self)
	}
}

impl Serialize for FixedList {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut seq = serializer.serialize_seq(Some(self.len()))?;
		for value in self {
			seq.serialize_element(value)?;
		}
		seq.end()
	}
}

impl Serialize for Structure {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Self::Map(map) => map.serialize(serializer),
			Self::List(list) => list.serialize(serializer),
		}
	}
}

impl Serialize for Value {
	/// Loose arrays follow the same map/list rule as the structure factory.
	/// Pair sources and opaque values have no serialized form.
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Self::Null => serializer.serialize_unit(),
			Self::Bool(val) => serializer.serialize_bool(*val),
			Self::Int(val) => serializer.serialize_i64(*val),
			Self::Float(val) => serializer.serialize_f64(*val),
			Self::String(val) => serializer.serialize_str(val),
			Self::Array(pairs) if pairs.iter().all(|(key, _)| key.is_int()) => {
				let mut seq = serializer.serialize_seq(Some(pairs.len()))?;
				for (_, value) in pairs {
					seq.serialize_element(value)?;
				}
				seq.end()
			}
			Self::Array(pairs) => serialize_entries(serializer, pairs.len(), pairs.iter().map(|(key, value)| (key, value))),
			Self::Map(map) => map.serialize(serializer),
			Self::List(list) => list.serialize(serializer),
			Self::Pairs(_) | Self::Opaque(_) => Err(S::Error::custom(format_args!("cannot serialize {} value", self.type_name()))),
		}
	}
}
