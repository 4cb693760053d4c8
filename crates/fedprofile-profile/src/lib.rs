//! Profiles: the entity that owns a resolved attribute set.
//!
//! A profile is loaded through a [`ProfileContext`], which carries the
//! configuration, the precedence resolver and the storage/directory adapters.
//! Behavior that differs between kinds of profiles sits behind the
//! [`ProfileVariant`] trait.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod aggregate;
pub mod context;
pub mod eap;
pub mod internal;
pub mod multi_method;
pub mod quota;
pub mod silverbullet;
pub mod variant;

mod prelude;

pub use aggregate::ProfileAggregate;
pub use context::ProfileContext;
pub use multi_method::MultiMethodProfile;
pub use silverbullet::SilverbulletProfile;
pub use variant::{ProfileVariant, VariantKind, load_profile};

// vim: ts=4
