//! Shared types, adapter traits, and error types for federated profile configuration.
//!
//! This crate holds everything the resolution engine, the profile layer and the
//! storage adapters have to agree on: the attribute data model, the identifiers
//! of the entities that carry attributes, and the narrow storage/directory ports.

#![forbid(unsafe_code)]

pub mod attr_adapter;
pub mod directory_adapter;
pub mod error;
pub mod prelude;
pub mod types;

// vim: ts=4
