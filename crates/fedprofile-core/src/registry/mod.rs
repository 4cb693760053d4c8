//! Attribute definitions and the registry that tells cumulative names apart

pub mod types;

pub use types::{
	AttributeDefinition, AttributeDefinitionBuilder, AttributeRegistry, FrozenAttributeRegistry,
};

// vim: ts=4
