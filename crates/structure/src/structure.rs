use std::iter::Enumerate;
use std::ops::Index;
use std::slice;

use crate::map::MapIter;
use crate::value::NULL;
use crate::{FixedList, Key, KeyRef, Map, Value};

/// A normalized, read-only container: either a [`Map`] or a [`FixedList`].
///
/// Both variants share the same read surface. List offsets are addressed
/// with non-negative integer keys and iterate as [`KeyRef::Int`].
#[derive(Debug, Clone, PartialEq)]
pub enum Structure {
	Map(Map),
	List(FixedList),
}

impl Structure {
	pub fn is_map(&self) -> bool {
		matches!(self, Self::Map(_))
	}

	pub fn is_list(&self) -> bool {
		matches!(self, Self::List(_))
	}

	pub fn as_map(&self) -> Option<&Map> {
		match self {
			Self::Map(map) => Some(map),
			Self::List(_) => None,
		}
	}

	pub fn as_list(&self) -> Option<&FixedList> {
		match self {
			Self::List(list) => Some(list),
			Self::Map(_) => None,
		}
	}

	pub fn len(&self) -> usize {
		match self {
			Self::Map(map) => map.len(),
			Self::List(list) => list.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn exists<'k>(&self, key: impl Into<KeyRef<'k>>) -> bool {
		self.get(key).is_some()
	}

	pub fn get<'k>(&self, key: impl Into<KeyRef<'k>>) -> Option<&Value> {
		match self {
			Self::Map(map) => map.get(key),
			Self::List(list) => key.into().as_index().and_then(|index| list.get(index)),
		}
	}

	pub fn get_or<'a, 'k>(&'a self, key: impl Into<KeyRef<'k>>, default: &'a Value) -> &'a Value {
		self.get(key).unwrap_or(default)
	}

	pub fn iter(&self) -> StructureIter<'_> {
		match self {
			Self::Map(map) => StructureIter::Map(map.iter()),
			Self::List(list) => StructureIter::List(list.iter().enumerate()),
		}
	}

	/// Owned key/value snapshot; list elements are keyed by offset.
	pub fn to_vec(&self) -> Vec<(Key, Value)> {
		self.iter().map(|(key, value)| (Key::from(key), value.clone())).collect()
	}
}

impl<'k, K: Into<KeyRef<'k>>> Index<K> for Structure {
	type Output = Value;

	fn index(&self, key: K) -> &Value {
		self.get_or(key, &NULL)
	}
}

impl From<Map> for Structure {
	fn from(map: Map) -> Self {
		Self::Map(map)
	}
}

impl From<FixedList> for Structure {
	fn from(list: FixedList) -> Self {
		Self::List(list)
	}
}

/// Ordered iterator over a [`Structure`]'s entries.
pub enum StructureIter<'a> {
	Map(MapIter<'a>),
	List(Enumerate<slice::Iter<'a, Value>>),
}

impl<'a> Iterator for StructureIter<'a> {
	type Item = (KeyRef<'a>, &'a Value);

	fn next(&mut self) -> Option<Self::Item> {
		match self {
			Self::Map(iter) => iter.next().map(|(key, value)| (key.as_key_ref(), value)),
			Self::List(iter) => iter.next().map(|(index, value)| (KeyRef::from(index), value)),
		}
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		match self {
			Self::Map(iter) => iter.size_hint(),
			Self::List(iter) => iter.size_hint(),
		}
	}
}

impl ExactSizeIterator for StructureIter<'_> {}

impl<'a> IntoIterator for &'a Structure {
	type Item = (KeyRef<'a>, &'a Value);
	type IntoIter = StructureIter<'a>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}
