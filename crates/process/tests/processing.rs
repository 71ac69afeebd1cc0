use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use intake_process::{
	AnyHydrateProcess, BuildProcess, BuilderRegistry, FallbackContext, HydrateProcess, HydratorFactory,
	HydratorRegistry, ModelRef, ProcessError, Processor, Result,
};
use intake_structure::{FixedList, Map, Value};
use pretty_assertions::assert_eq;
use rustc_hash as _;
use serde as _;
use serde_json::json;
use thiserror as _;
use toml as _;
use tracing as _;

#[derive(Debug, Default, Clone, PartialEq)]
struct Date {
	year: i64,
	month: i64,
	day: i64,
}

fn date_hydrator() -> HydrateProcess<Date> {
	HydrateProcess::from_fn(|input: &Value, mut date: Date| {
		let fields = input.as_map()?;
		date.year = fields.field("year").as_int()?;
		date.month = fields.field("month").as_int()?;
		date.day = fields.field("day").as_int()?;
		Ok(date)
	})
}

#[derive(Debug, Clone, PartialEq)]
struct Pet {
	name: String,
	sounds: Vec<String>,
}

fn pet_from(value: &Value) -> Result<Pet> {
	let fields = value.as_map()?;
	let sounds = fields
		.field("stuff")
		.as_list()?
		.iter()
		.map(|sound| -> Result<String> { Ok(sound.as_str()?.to_owned()) })
		.collect::<Result<Vec<_>>>()?;
	Ok(Pet {
		name: fields.field("name").as_str()?.to_owned(),
		sounds,
	})
}

#[test]
fn hydrates_a_date_from_json() {
	let input = Value::from(json!({"year": 1983, "month": 1, "day": 2}));
	let date = Processor::new()
		.process_for_model(input, Date::default(), Some(&date_hydrator()), None)
		.expect("date fields are present");

	assert_eq!(
		date,
		Date {
			year: 1983,
			month: 1,
			day: 2
		}
	);
}

#[test]
fn builds_pets_from_a_list_of_maps() {
	let input = Value::from(json!([
		{"name": "doge", "stuff": ["woof", "wow"]},
		{"name": "cat", "stuff": ["meow"]},
	]));
	let builder = BuildProcess::from_fn(|input: &Value| input.as_list()?.iter().map(pet_from).collect::<Result<Vec<_>>>());

	let pets = Processor::new()
		.process_for_type(input, Some(&builder), None, None)
		.expect("pets are well formed");

	assert_eq!(
		pets,
		[
			Pet {
				name: "doge".into(),
				sounds: vec!["woof".into(), "wow".into()],
			},
			Pet {
				name: "cat".into(),
				sounds: vec!["meow".into()],
			},
		]
	);
}

#[test]
fn mixed_keys_reach_the_builder_as_a_map() {
	let builder = BuildProcess::from_fn(|input: &Value| Ok(input.as_map()?.clone()));
	let map = Processor::new()
		.process_for_type(Value::from(json!({"name": "markus", "0": "mixed"})), Some(&builder), None, None)
		.expect("object input builds a map");

	assert_eq!(map.len(), 2);
	assert_eq!(map["name"], Value::from("markus"));
	assert_eq!(map[0], Value::from("mixed"));
}

#[test]
fn missing_factories_are_reported() {
	let processor = Processor::new();

	let err = processor
		.process_for_model(Value::from(json!({})), Date::default(), None, None)
		.expect_err("no hydrator anywhere");
	assert!(matches!(err, ProcessError::UnresolvableHydrator { model } if model.is::<Date>()));

	let err = processor
		.process_for_type::<Date>(Value::from(json!({})), None, None, None)
		.expect_err("no builder anywhere");
	assert!(matches!(err, ProcessError::UnresolvableBuilder { model } if model.is::<Date>()));
}

struct CountingHydrators {
	inner: HydratorRegistry,
	calls: AtomicUsize,
}

impl HydratorFactory for CountingHydrators {
	fn build_for_model(&self, model: ModelRef<'_>) -> Result<AnyHydrateProcess> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		self.inner.build_for_model(model)
	}
}

#[test]
fn hydrator_factory_is_called_exactly_once_per_call() {
	let factory = Arc::new(CountingHydrators {
		inner: HydratorRegistry::new().with(date_hydrator()),
		calls: AtomicUsize::new(0),
	});
	let mut processor = Processor::new();
	processor.set_hydrator_factory(Some(factory.clone()));

	let date = processor
		.process_for_model(
			Value::from(json!({"year": 2001, "month": 9, "day": 9})),
			Date::default(),
			None,
			None,
		)
		.expect("registered hydrator");

	assert_eq!(date.year, 2001);
	assert_eq!(factory.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn hydration_follows_building_with_the_same_input() {
	let log = Arc::new(Mutex::new(Vec::new()));

	let build_log = Arc::clone(&log);
	let builder = BuildProcess::from_fn(move |input: &Value| {
		build_log.lock().expect("log lock").push(("build", input.clone()));
		Ok(Date::default())
	});
	let hydrate_log = Arc::clone(&log);
	let hydrator = HydrateProcess::from_fn(move |input: &Value, date: Date| {
		hydrate_log.lock().expect("log lock").push(("hydrate", input.clone()));
		Ok(date)
	});

	let mut processor = Processor::new().with_hydrator_factory(HydratorRegistry::new().with(hydrator));
	processor.set_always_hydrate_after_building(true);
	processor
		.process_for_type(Value::from(json!({"year": 1983})), Some(&builder), None, None)
		.expect("both halves succeed");

	let log = log.lock().expect("log lock");
	let stages: Vec<_> = log.iter().map(|(stage, _)| *stage).collect();
	assert_eq!(stages, ["build", "hydrate"]);
	assert_eq!(log[0].1, log[1].1);
	assert!(log[0].1.as_map().is_ok());
}

#[test]
fn explicit_hydrator_runs_after_building_without_the_flag() {
	let builder = BuildProcess::from_fn(|_: &Value| Ok(Date::default()));
	let date = Processor::new()
		.process_for_type(
			Value::from(json!({"year": 1983, "month": 1, "day": 2})),
			Some(&builder),
			Some(&date_hydrator()),
			None,
		)
		.expect("build then hydrate");
	assert_eq!(date.day, 2);
}

#[test]
fn build_failure_aborts_before_hydration() {
	let hydrations = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&hydrations);
	let hydrator = HydrateProcess::from_fn(move |_: &Value, date: Date| {
		counter.fetch_add(1, Ordering::SeqCst);
		Ok(date)
	});
	let builder = BuildProcess::from_fn(|_: &Value| -> Result<Date> { Err(ProcessError::building("no calendar")) });

	let err = Processor::new()
		.process_for_type(Value::from(json!({})), Some(&builder), Some(&hydrator), None)
		.expect_err("builder fails");

	assert!(matches!(err, ProcessError::Building(_)));
	assert_eq!(hydrations.load(Ordering::SeqCst), 0);
}

#[test]
fn builder_registry_serves_the_processor() {
	let registry = BuilderRegistry::new().with(BuildProcess::from_fn(pet_from));
	let pet = Processor::new()
		.with_builder_factory(registry)
		.process_for_type::<Pet>(Value::from(json!({"name": "doge", "stuff": ["woof"]})), None, None, None)
		.expect("registered builder");
	assert_eq!(pet.sounds, ["woof"]);
}

#[test]
fn contextual_hydrators_receive_context_under_strict_policy() {
	let hydrator = HydrateProcess::contextual(FallbackContext::new(
		|input: &Value, mut date: Date, context: Option<&Map>| -> Result<Date> {
			date.year = input.as_map()?.field("year").as_int()?;
			date.day = context.map_or(-1, |context| context.field("day").as_int().unwrap_or(0));
			Ok(date)
		},
	));
	let mut processor = Processor::new();
	processor.set_require_contextual_processing_compatibility(true);

	let context = Map::from_pairs([("day", Value::from(2))]);
	let date = processor
		.process_for_model(Value::from(json!({"year": 1983})), Date::default(), Some(&hydrator), Some(&context))
		.expect("contextual hydrator");
	assert_eq!((date.year, date.day), (1983, 2));

	let date = processor
		.process_for_model(Value::from(json!({"year": 1983})), Date::default(), Some(&hydrator), None)
		.expect("fallback context");
	assert_eq!(date.day, 0);
}

#[test]
fn plain_processes_reject_context_under_strict_policy() {
	let mut processor = Processor::new();
	processor.set_require_contextual_processing_compatibility(true);
	let context = Map::from_pairs([("day", Value::from(2))]);

	let err = processor
		.process_for_model(Value::from(json!({"year": 1983})), Date::default(), Some(&date_hydrator()), Some(&context))
		.expect_err("plain hydrator with context");
	assert!(matches!(err, ProcessError::IncompatibleProcess { .. }));

	processor.set_require_contextual_processing_compatibility(false);
	let err = processor
		.process_for_model(Value::from(json!({"year": 1983})), Date::default(), Some(&date_hydrator()), Some(&context))
		.expect_err("context is dropped, so the missing month fails");
	assert!(matches!(err, ProcessError::Value(_)));
}

#[test]
fn empty_input_reaches_builders_as_an_empty_list() {
	let builder = BuildProcess::from_fn(|input: &Value| Ok(input.as_list()?.clone()));
	let list = Processor::new()
		.process_for_type(Value::from(json!([])), Some(&builder), None, None)
		.expect("empty input");
	assert_eq!(list, FixedList::new());
}
