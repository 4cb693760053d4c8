//! Built-in attribute definitions
//!
//! Names of the synthetic attributes computed on profile load, and the
//! federation attribute that overrides the per-profile user quota.

use crate::prelude::*;
use crate::registry::{AttributeDefinition, AttributeRegistry};

pub const ATTR_PROFILE_COUNT: &str = "internal:profile_count";
pub const ATTR_REALM: &str = "internal:realm";
pub const ATTR_USE_ANON_OUTER: &str = "internal:use_anon_outer";
pub const ATTR_ANON_LOCAL_VALUE: &str = "internal:anon_local_value";
pub const ATTR_MAX_USERS: &str = "internal:silverbullet_maxusers";

pub const FED_ATTR_MAX_USERS: &str = "fed:silverbullet-maxusers";

/// Register all built-in attributes
pub fn register_attributes(registry: &mut AttributeRegistry) -> ClResult<()> {
	registry.register(
		AttributeDefinition::builder(ATTR_PROFILE_COUNT)
			.description("Number of profiles the owning institution has")
			.build()?,
	)?;

	registry.register(
		AttributeDefinition::builder(ATTR_REALM)
			.description("Domain part of the profile realm")
			.build()?,
	)?;

	registry.register(
		AttributeDefinition::builder(ATTR_USE_ANON_OUTER)
			.description("Whether an anonymous outer identity is used")
			.build()?,
	)?;

	registry.register(
		AttributeDefinition::builder(ATTR_ANON_LOCAL_VALUE)
			.description("Local part of the anonymous outer identity")
			.build()?,
	)?;

	registry.register(
		AttributeDefinition::builder(ATTR_MAX_USERS)
			.description("Maximum number of users of the profile")
			.build()?,
	)?;

	registry.register(
		AttributeDefinition::builder(FED_ATTR_MAX_USERS)
			.description("Federation override of the per-profile user quota")
			.build()?,
	)?;

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_builtins_are_not_cumulative() {
		let mut registry = AttributeRegistry::new();
		assert!(register_attributes(&mut registry).is_ok());
		let registry = registry.freeze();
		assert_eq!(registry.len(), 6);
		assert!(registry.list().all(|def| !def.cumulative));
	}
}

// vim: ts=4
