use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use crate::value::NULL;
use crate::{Key, Value};

/// A fixed-length, read-only list indexed from zero.
///
/// Out-of-range reads yield a caller-supplied default instead of failing.
///
/// ```compile_fail
/// use intake_structure::{FixedList, Value};
///
/// let list = FixedList::from_values([Value::from("woof")]);
/// list.push(Value::from("wow"));
/// ```
#[derive(Clone, Default, PartialEq)]
pub struct FixedList {
	items: Arc<[Value]>,
}

impl FixedList {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_values<I>(values: I) -> Self
	where
		I: IntoIterator<Item = Value>,
	{
		values.into_iter().collect()
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn exists(&self, index: usize) -> bool {
		index < self.items.len()
	}

	pub fn get(&self, index: usize) -> Option<&Value> {
		self.items.get(index)
	}

	/// Returns the element at `index`, or `default` when out of range.
	pub fn get_or<'a>(&'a self, index: usize, default: &'a Value) -> &'a Value {
		self.get(index).unwrap_or(default)
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Value> {
		self.items.iter()
	}

	pub fn as_slice(&self) -> &[Value] {
		&self.items
	}

	pub fn to_vec(&self) -> Vec<Value> {
		self.items.to_vec()
	}

	pub(crate) fn into_pairs(self) -> Vec<(Key, Value)> {
		self.items.iter().cloned().enumerate().map(|(index, value)| (Key::from(index), value)).collect()
	}
}

impl FromIterator<Value> for FixedList {
	fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
		Self {
			items: iter.into_iter().collect(),
		}
	}
}

impl Index<usize> for FixedList {
	type Output = Value;

	fn index(&self, index: usize) -> &Value {
		self.get_or(index, &NULL)
	}
}

impl fmt::Debug for FixedList {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.items.iter()).finish()
	}
}

impl<'a> IntoIterator for &'a FixedList {
	type Item = &'a Value;
	type IntoIter = std::slice::Iter<'a, Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}
