//! Attribute precedence resolution for federated profile configuration.
//!
//! Everything in this crate is synchronous and free of storage concerns: it
//! folds already-fetched attribute collections into one effective set, picks
//! scalar defaults from a fixed fallback chain and derives realm names.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod cascade;
pub mod config;
pub mod core_attributes;
pub mod effective;
pub mod precedence;
pub mod prelude;
pub mod realm;
pub mod registry;

pub use cascade::{CascadingDefault, resolve_scalar};
pub use config::{ConsortiumConfig, GlobalAttribute};
pub use effective::EffectiveAttributeSet;
pub use precedence::PrecedenceResolver;
pub use realm::RealmNameBuilder;

use crate::prelude::*;

/// Registers the built-in attribute definitions
pub fn register_attributes(registry: &mut registry::AttributeRegistry) -> ClResult<()> {
	core_attributes::register_attributes(registry)
}

// vim: ts=4
