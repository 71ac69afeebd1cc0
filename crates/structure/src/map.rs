use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::value::NULL;
use crate::{Key, KeyRef, Value};


type Entries = IndexMap<Key, Value, FxBuildHasher>;

/// A key => value, read-only map.
///
/// Keys are unique scalars and iteration follows insertion order. A map is
/// built once through [`Map::from_pairs`] (or [`FromIterator`]); no method
/// mutates it afterwards, and clones share the same entries.
///
/// ```compile_fail
/// use intake_structure::{Map, Value};
///
/// let map = Map::from_pairs([("name", Value::from("markus"))]);
/// map.insert("name", Value::Null);
/// ```
///
/// ```compile_fail
/// use intake_structure::{Map, Value};
///
/// let mut map = Map::from_pairs([("name", Value::from("markus"))]);
/// map["name"] = Value::Null;
/// ```
#[derive(Clone, Default)]
pub struct Map {
	entries: Arc<Entries>,
}

impl Map {
	/// Creates an empty map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a map from an ordered key/value sequence.
	///
	/// A repeated key keeps its first position and takes the last value.
	pub fn from_pairs<K, I>(pairs: I) -> Self
	where
		K: Into<Key>,
		I: IntoIterator<Item = (K, Value)>,
	{
		pairs.into_iter().collect()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn exists<'k>(&self, key: impl Into<KeyRef<'k>>) -> bool {
		self.entries.contains_key(&key.into())
	}

	pub fn get<'k>(&self, key: impl Into<KeyRef<'k>>) -> Option<&Value> {
		self.entries.get(&key.into())
	}

	/// Returns the value at `key`, or `default` when the key is absent.
	pub fn get_or<'a, 'k>(&'a self, key: impl Into<KeyRef<'k>>, default: &'a Value) -> &'a Value {
		self.get(key).unwrap_or(default)
	}

	pub fn keys(&self) -> indexmap::map::Keys<'_, Key, Value> {
		self.entries.keys()
	}

	pub fn values(&self) -> indexmap::map::Values<'_, Key, Value> {
		self.entries.values()
	}

	pub fn iter(&self) -> MapIter<'_> {
		MapIter {
			inner: self.entries.iter(),
		}
	}

	/// Owned snapshot of the entries in iteration order.
	pub fn to_vec(&self) -> Vec<(Key, Value)> {
		self.iter().map(|(key, value)| (key.clone(), value.clone())).collect()
	}

	/// Field-style projection: whether a string key named `name` exists.
	pub fn has_field(&self, name: &str) -> bool {
		self.exists(name)
	}

	/// Field-style projection: the value of string key `name`, or
	/// [`Value::Null`] when absent.
	pub fn field(&self, name: &str) -> &Value {
		self.get_or(name, &NULL)
	}

	pub(crate) fn into_pairs(self) -> Vec<(Key, Value)> {
		match Arc::try_unwrap(self.entries) {
			Ok(entries) => entries.into_iter().collect(),
			Err(shared) => shared.iter().map(|(key, value)| (key.clone(), value.clone())).collect(),
		}
	}
}

impl<K: Into<Key>> FromIterator<(K, Value)> for Map {
	fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
		let iter = iter.into_iter();
		let mut entries = Entries::with_capacity_and_hasher(iter.size_hint().0, FxBuildHasher);
		for (key, value) in iter {
			entries.insert(key.into(), value);
		}
		Self {
			entries: Arc::new(entries),
		}
	}
}

impl<'k, K: Into<KeyRef<'k>>> Index<K> for Map {
	type Output = Value;

	/// Missing keys index to [`Value::Null`].
	fn index(&self, key: K) -> &Value {
		self.get_or(key, &NULL)
	}
}

impl PartialEq for Map {
	fn eq(&self, other: &Self) -> bool {
		self.len() == other.len() && self.iter().eq(other.iter())
	}
}

impl fmt::Debug for Map {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_map().entries(self.iter()).finish()
	}
}

/// Ordered iterator over a [`Map`]'s entries.
pub struct MapIter<'a> {
	inner: indexmap::map::Iter<'a, Key, Value>,
}

impl<'a> Iterator for MapIter<'a> {
	type Item = (&'a Key, &'a Value);

	fn next(&mut self) -> Option<Self::Item> {
		self.inner.next()
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}
}

impl ExactSizeIterator for MapIter<'_> {}

impl DoubleEndedIterator for MapIter<'_> {
	fn next_back(&mut self) -> Option<Self::Item> {
		self.inner.next_back()
	}
}

impl<'a> IntoIterator for &'a Map {
	type Item = (&'a Key, &'a Value);
	type IntoIter = MapIter<'a>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}
