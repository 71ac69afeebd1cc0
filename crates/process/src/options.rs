use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Processing policy flags, loadable from TOML.
///
/// ```toml
/// always_hydrate_after_building = true
/// require_contextual_processing_compatibility = false
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessorOptions {
	/// Run a hydrator after every build, resolving one when none is supplied.
	pub always_hydrate_after_building: bool,
	/// Fail instead of silently dropping context for processes that cannot
	/// accept it.
	pub require_contextual_processing_compatibility: bool,
}

impl ProcessorOptions {
	pub fn from_toml_str(input: &str) -> Result<Self> {
		Ok(toml::from_str(input)?)
	}
}
