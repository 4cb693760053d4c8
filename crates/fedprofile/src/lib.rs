//! Attribute precedence resolution for federated network access profiles.
//!
//! # Features
//!
//! - Layered attributes: consortium, federation, institution, profile
//!     - per-EAP-method and per-device overrides
//!     - multi-valued attributes that accumulate across levels
//! - Cascading defaults for scalar settings such as the user quota
//! - Realm derivation for managed profiles, persisted once
//! - Storage and directory access behind adapter traits

// Re-export shared types and adapter traits from fedprofile-types
pub use fedprofile_types::attr_adapter;
pub use fedprofile_types::directory_adapter;
pub use fedprofile_types::error;
pub use fedprofile_types::types;

// Feature crate re-exports
pub use fedprofile_core as engine;
pub use fedprofile_profile as profile;

// Local modules
pub mod app;
pub mod prelude;

pub use crate::app::{App, AppBuilder, AppState};

// vim: ts=4
