use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;

use super::*;
use crate::Traversable;

/// Pair source standing in for a lazily iterated collection.
#[derive(Debug)]
struct Stream(Vec<(Key, Value)>);

impl Traversable for Stream {
	fn pairs(&self) -> Box<dyn Iterator<Item = (Key, Value)> + '_> {
		Box::new(self.0.iter().cloned())
	}
}

fn build(data: Value) -> Structure {
	RecursiveStructureFactory::new().build(data).expect("input should be traversable")
}

#[test]
fn build_with_array_of_maps() {
	let data = Value::from(json!([
		{"name": "doge", "stuff": ["woof", "wow"]},
		{"name": "cat", "stuff": ["meow"]},
	]));

	let structure = build(data);
	let list = structure.as_list().expect("integer keys build a list");
	assert_eq!(list.len(), 2);

	let doge = list[0].as_map().expect("element is a map");
	let cat = list[1].as_map().expect("element is a map");
	assert_eq!(doge["name"], Value::from("doge"));
	assert_eq!(doge["stuff"].as_list().map(FixedList::len), Ok(2));
	assert_eq!(cat["stuff"].as_list().map(FixedList::len), Ok(1));
}

#[test]
fn build_with_pairs_source() {
	let data = Value::pairs(Stream(vec![
		(Key::from("name"), Value::from("doge")),
		(Key::from("stuff"), Value::sequence([Value::from("woof")])),
	]));

	let structure = build(data);
	let map = structure.as_map().expect("string keys build a map");
	assert!(map["stuff"].as_list().is_ok());
}

#[test]
fn build_with_nested_pair_sources() {
	let inner = Value::pairs(Stream(vec![(Key::from(0), Value::from("deep"))]));
	let middle = Value::pairs(Stream(vec![(Key::from("inner"), inner)]));
	let data = Value::pairs(Stream(vec![(Key::from(0), middle)]));

	let structure = build(data);
	let middle = structure[0].as_map().expect("middle level is a map");
	let inner = middle["inner"].as_list().expect("inner level is a list");
	assert_eq!(inner[0], Value::from("deep"));
}

#[test]
fn mixed_keys_build_a_map_preserving_every_key() {
	let structure = build(Value::from(json!({"name": "markus", "0": "mixed"})));
	let map = structure.as_map().expect("a string key selects a map");
	assert_eq!(map.len(), 2);
	assert_eq!(map["name"], Value::from("markus"));
	assert_eq!(map[0], Value::from("mixed"));
}

#[test]
fn late_non_integer_key_still_selects_a_map() {
	let data = Value::array([
		(Key::from(0), Value::from("a")),
		(Key::from(1), Value::from("b")),
		(Key::from("late"), Value::from("c")),
	]);

	let structure = build(data);
	let map = structure.as_map().expect("the whole input is scanned before classifying");
	assert_eq!(
		map.keys().cloned().collect::<Vec<_>>(),
		[Key::from(0), Key::from(1), Key::from("late")]
	);
}

#[test]
fn list_classification_renumbers_in_iteration_order() {
	let data = Value::array([(Key::from(7), Value::from("first")), (Key::from(2), Value::from("second"))]);

	let structure = build(data);
	let list = structure.as_list().expect("integer keys build a list");
	assert_eq!(list.to_vec(), [Value::from("first"), Value::from("second")]);
}

#[test]
fn repeated_offsets_collapse_like_map_keys() {
	let structure = build(Value::array([(0, Value::from("a")), (0, Value::from("b"))]));
	let list = structure.as_list().expect("integer keys build a list");
	assert_eq!(list.to_vec(), [Value::from("b")]);

	let structure = build(Value::array([
		(Key::from(0), Value::from("a")),
		(Key::from(1), Value::from("b")),
		(Key::from(0), Value::from("c")),
	]));
	let list = structure.as_list().expect("integer keys build a list");
	assert_eq!(list.to_vec(), [Value::from("c"), Value::from("b")]);

	let map = build(Value::array([("x", Value::from("a")), ("x", Value::from("b"))]));
	assert_eq!(map.len(), 1);
	assert_eq!(map["x"], Value::from("b"));
}

#[test]
fn repeated_offsets_from_pair_sources_collapse_too() {
	let data = Value::pairs(Stream(vec![
		(Key::from(3), Value::from("first")),
		(Key::from(3), Value::from("second")),
	]));

	let structure = build(data);
	let list = structure.as_list().expect("integer keys build a list");
	assert_eq!(list.to_vec(), [Value::from("second")]);
}

#[test]
fn empty_input_builds_an_empty_list() {
	let structure = build(Value::Array(Vec::new()));
	assert!(structure.is_list());
	assert!(structure.is_empty());

	let structure = build(Value::from(json!({})));
	assert!(structure.is_list());
}

#[test]
fn scalars_are_rejected_with_their_type() {
	let factory = RecursiveStructureFactory::new();
	assert_eq!(
		factory.build(Value::from("string")),
		Err(StructureError::InvalidStructuralType { type_name: "string" })
	);
	assert_eq!(
		factory.build(Value::Null),
		Err(StructureError::InvalidStructuralType { type_name: "null" })
	);

	let err = factory.build(Value::opaque(42u32)).expect_err("opaque values are not traversable");
	assert_eq!(err.to_string(), "invalid structural type `u32`");
}

#[test]
fn leaves_pass_through_untouched() {
	let model = Value::opaque(String::from("model"));
	let structure = build(Value::array([("model", model.clone()), ("n", Value::from(1.5))]));

	assert_eq!(structure["model"], model);
	assert_eq!(structure["n"], Value::from(1.5));
}

#[test]
fn existing_structures_are_renormalized() {
	let first = build(Value::from(json!({"a": [1, 2]})));
	let second = build(Value::from(first.clone()));
	assert_eq!(first, second);
}

#[test]
fn depth_budget_rejects_deep_input() {
	let data = Value::from(json!({"a": {"b": {"c": 1}}}));

	let shallow = RecursiveStructureFactory::new().with_max_depth(1);
	assert_eq!(shallow.build(data.clone()), Err(StructureError::DepthExceeded { max_depth: 1 }));

	let deep_enough = RecursiveStructureFactory::new().with_max_depth(2);
	assert!(deep_enough.build(data).is_ok());
}

fn key() -> impl Strategy<Value = Key> {
	prop_oneof![
		4 => any::<i64>().prop_map(Key::Int),
		1 => "[a-z]{1,6}".prop_map(Key::from),
		1 => any::<bool>().prop_map(Key::Bool),
	]
}

fn leaf() -> impl Strategy<Value = Value> {
	prop_oneof![
		Just(Value::Null),
		any::<bool>().prop_map(Value::Bool),
		any::<i64>().prop_map(Value::Int),
		"[a-z]{0,6}".prop_map(Value::from),
	]
}

fn loose() -> impl Strategy<Value = Value> {
	leaf().prop_recursive(4, 48, 6, |inner| prop::collection::vec((key(), inner), 0..6).prop_map(Value::Array))
}

fn is_normalized(value: &Value) -> bool {
	match value {
		Value::Array(_) | Value::Pairs(_) => false,
		Value::Map(map) => map.values().all(is_normalized),
		Value::List(list) => list.iter().all(is_normalized),
		_ => true,
	}
}

proptest! {
	#[test]
	fn classifies_as_map_iff_some_key_is_not_an_integer(
		pairs in prop::collection::vec((key(), loose()), 0..8),
	) {
		let expect_map = pairs.iter().any(|(key, _)| !key.is_int());
		let structure = build(Value::Array(pairs));
		prop_assert_eq!(structure.is_map(), expect_map);
	}

	#[test]
	fn every_traversable_level_is_normalized(data in prop::collection::vec((key(), loose()), 0..8)) {
		let structure = build(Value::Array(data));
		prop_assert!(is_normalized(&Value::from(structure)));
	}

	#[test]
	fn list_leaves_keep_their_values(values in prop::collection::vec(leaf(), 0..8)) {
		let structure = build(Value::sequence(values.clone()));
		let list = structure.as_list().expect("sequences build lists");
		prop_assert_eq!(list.to_vec(), values);
	}
}
