//! Attribute registry types
//!
//! Definitions describe how an attribute name behaves during resolution. The
//! only behavior the resolver cares about is whether values of a name
//! accumulate across levels instead of being overridden.

use std::collections::HashMap;

use crate::prelude::*;

/// Attribute definition - metadata for one attribute name or namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDefinition {
	/// Namespaced name (e.g., "display:name") or namespace wildcard (e.g., "media:*")
	pub name: String,

	/// Human-readable description
	pub description: String,

	/// Values declared at several levels are all kept, more specific first
	pub cumulative: bool,
}

impl AttributeDefinition {
	/// Create a builder for constructing an AttributeDefinition
	pub fn builder(name: impl Into<String>) -> AttributeDefinitionBuilder {
		AttributeDefinitionBuilder::new(name)
	}
}

/// Builder for AttributeDefinition with fluent API
pub struct AttributeDefinitionBuilder {
	name: String,
	description: Option<String>,
	cumulative: bool,
}

impl AttributeDefinitionBuilder {
	pub fn new(name: impl Into<String>) -> Self {
		Self { name: name.into(), description: None, cumulative: false }
	}

	/// Set the description (required)
	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Mark values of this attribute as accumulating across levels
	pub fn cumulative(mut self, cumulative: bool) -> Self {
		self.cumulative = cumulative;
		self
	}

	/// Build the AttributeDefinition
	pub fn build(self) -> ClResult<AttributeDefinition> {
		let description = self
			.description
			.ok_or_else(|| Error::ConfigError("Attribute description is required".into()))?;

		if self.name.is_empty() {
			return Err(Error::ConfigError("Attribute name cannot be empty".into()));
		}
		// A wildcard is only allowed as the whole local part: "<namespace>:*"
		if self.name.contains('*') && !is_namespace_wildcard(&self.name) {
			return Err(Error::ConfigError(format!(
				"Invalid wildcard attribute name '{}': expected '<namespace>:*'",
				self.name
			)));
		}

		Ok(AttributeDefinition { name: self.name, description, cumulative: self.cumulative })
	}
}

fn is_namespace_wildcard(name: &str) -> bool {
	name.strip_suffix(":*").is_some_and(|ns| !ns.is_empty() && !ns.contains(['*', ':']))
}

/// Mutable registry used during startup
#[derive(Debug)]
pub struct AttributeRegistry {
	definitions: HashMap<String, AttributeDefinition>,
}

impl AttributeRegistry {
	pub fn new() -> Self {
		Self { definitions: HashMap::new() }
	}

	/// Register a new attribute definition
	pub fn register(&mut self, def: AttributeDefinition) -> ClResult<()> {
		if self.definitions.contains_key(&def.name) {
			return Err(Error::ConfigError(format!(
				"Attribute '{}' is already registered",
				def.name
			)));
		}

		debug!("Registering attribute: {} (cumulative={})", def.name, def.cumulative);
		self.definitions.insert(def.name.clone(), def);
		Ok(())
	}

	/// Freeze the registry (make it immutable)
	pub fn freeze(self) -> FrozenAttributeRegistry {
		info!("Freezing attribute registry with {} definitions", self.definitions.len());
		FrozenAttributeRegistry { definitions: self.definitions }
	}

	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}
}

impl Default for AttributeRegistry {
	fn default() -> Self {
		Self::new()
	}
}

/// Immutable registry shared by resolvers
#[derive(Debug, Default)]
pub struct FrozenAttributeRegistry {
	definitions: HashMap<String, AttributeDefinition>,
}

impl FrozenAttributeRegistry {
	/// Get a definition by name
	/// First tries exact match, then the namespace wildcard "<namespace>:*"
	pub fn get(&self, name: &str) -> Option<&AttributeDefinition> {
		if let Some(def) = self.definitions.get(name) {
			return Some(def);
		}

		if let Some(colon_pos) = name.find(':') {
			let wildcard_name = format!("{}:*", &name[..colon_pos]);
			if let Some(def) = self.definitions.get(&wildcard_name) {
				return Some(def);
			}
		}

		None
	}

	/// Unregistered names are never cumulative
	pub fn is_cumulative(&self, name: &str) -> bool {
		self.get(name).is_some_and(|def| def.cumulative)
	}

	pub fn list(&self) -> impl Iterator<Item = &AttributeDefinition> {
		self.definitions.values()
	}

	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}
}


// vim: ts=4
