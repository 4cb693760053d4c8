//! Consortium configuration
//!
//! Read once at startup and passed to whatever needs it. Nothing in the
//! resolution path reads process-wide state.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use crate::core_attributes;
use crate::prelude::*;
use crate::registry::{AttributeDefinition, AttributeRegistry, FrozenAttributeRegistry};

/// Absolute last-resort user quota when neither the consortium nor the
/// federation configures one
pub const HARDCODED_MAX_USERS: u32 = 200;

pub const DEFAULT_REALM_SUFFIX: &str = ".hosted.eduroam.org";

/// Attribute declared for every profile at the global level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalAttribute {
	pub name: String,
	pub value: AttrValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsortiumConfig {
	/// Consortium-wide user quota per profile
	pub default_max_users: Option<u32>,
	/// Appended to every derived realm, including the leading dot
	pub realm_suffix: String,
	/// Local part of the anonymous outer identity
	pub anon_local_value: String,
	/// Attribute names (or "<namespace>:*") whose values accumulate across levels
	pub cumulative_attributes: Vec<String>,
	pub global_attributes: Vec<GlobalAttribute>,
}

impl Default for ConsortiumConfig {
	fn default() -> Self {
		Self {
			default_max_users: None,
			realm_suffix: DEFAULT_REALM_SUFFIX.to_string(),
			anon_local_value: String::new(),
			cumulative_attributes: Vec::new(),
			global_attributes: Vec::new(),
		}
	}
}

impl ConsortiumConfig {
	pub fn from_json_str(json: &str) -> ClResult<Self> {
		let config: Self = serde_json::from_str(json)
			.map_err(|e| Error::ConfigError(format!("Invalid consortium config: {}", e)))?;
		config.validate()?;
		Ok(config)
	}

	pub fn from_file(path: impl AsRef<Path>) -> ClResult<Self> {
		let path = path.as_ref();
		info!("Loading consortium config from {}", path.display());
		let json = std::fs::read_to_string(path)?;
		Self::from_json_str(&json)
	}

	pub fn validate(&self) -> ClResult<()> {
		if self.realm_suffix.is_empty() {
			return Err(Error::ConfigError("realm_suffix cannot be empty".into()));
		}
		if !self.realm_suffix.starts_with('.') {
			return Err(Error::ConfigError(format!(
				"realm_suffix must start with '.': '{}'",
				self.realm_suffix
			)));
		}
		if self.realm_suffix.contains('@') || self.realm_suffix.chars().any(char::is_whitespace) {
			return Err(Error::ConfigError(format!(
				"Invalid realm_suffix: '{}'",
				self.realm_suffix
			)));
		}
		if let Some(g) = self.global_attributes.iter().find(|g| g.name.is_empty()) {
			return Err(Error::ConfigError(format!(
				"Global attribute with empty name (value {})",
				g.value
			)));
		}
		Ok(())
	}

	/// Global-level attribute rows, in configuration order
	pub fn global_records(&self) -> Vec<AttributeRecord> {
		let mut rows: std::collections::HashMap<&str, u32> = std::collections::HashMap::new();
		self.global_attributes
			.iter()
			.map(|g| {
				let row = rows.entry(g.name.as_str()).or_insert(0);
				let rec = AttributeRecord::new(g.name.as_str(), g.value.clone())
					.with_level(Level::Global)
					.with_row(*row);
				*row += 1;
				rec
			})
			.collect()
	}

	/// Built-in definitions plus the configured cumulative names
	pub fn build_registry(&self) -> ClResult<Arc<FrozenAttributeRegistry>> {
		let mut registry = AttributeRegistry::new();
		core_attributes::register_attributes(&mut registry)?;
		for name in &self.cumulative_attributes {
			registry.register(
				AttributeDefinition::builder(name.as_str())
					.description("Configured cumulative attribute")
					.cumulative(true)
					.build()?,
			)?;
		}
		Ok(Arc::new(registry.freeze()))
	}
}


// vim: ts=4
