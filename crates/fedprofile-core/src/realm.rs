//! Realm name derivation
//!
//! A derived realm has the form
//! `<institution>-<profile>.<federation code, lowercased><suffix>`, e.g.
//! `example.edu-42.us.hosted.example`. Realms end up inside credentials that
//! have already been handed out, so they are derived once and then only read
//! back from storage.

use std::fmt::Display;

use crate::prelude::*;

/// Local part used in the full user-identity form of a realm
pub const OPAQUE_LOCAL_PART: &str = "opaquehash";

#[derive(Debug, Clone)]
pub struct RealmNameBuilder {
	suffix: Box<str>,
}

impl RealmNameBuilder {
	pub fn new(suffix: impl Into<Box<str>>) -> Self {
		Self { suffix: suffix.into() }
	}

	pub fn suffix(&self) -> &str {
		&self.suffix
	}

	pub fn build(&self, inst_identifier: &str, profile_identifier: impl Display, federation: &str) -> String {
		build_realm(inst_identifier, profile_identifier, federation, &self.suffix)
	}
}

pub fn build_realm(
	inst_identifier: &str,
	profile_identifier: impl Display,
	federation: &str,
	suffix: &str,
) -> String {
	format!("{}-{}.{}{}", inst_identifier, profile_identifier, federation.to_lowercase(), suffix)
}

/// Full user-identity form of a realm, with a placeholder local part
pub fn identity_realm(realm: &str) -> String {
	format!("{}@{}", OPAQUE_LOCAL_PART, realm)
}

/// Domain part of an identity: everything after the last '@'
pub fn realm_domain(identity: &str) -> &str {
	identity.rsplit_once('@').map_or(identity, |(_, domain)| domain)
}

/// Reject realms that cannot be routed
pub fn validate_realm(realm: &str) -> ClResult<()> {
	if realm.is_empty() {
		return Err(Error::ValidationError("Realm cannot be empty".into()));
	}
	if realm.contains('@') || realm.chars().any(char::is_whitespace) {
		return Err(Error::ValidationError(format!("Invalid realm: '{}'", realm)));
	}
	if realm.starts_with('.') || realm.ends_with('.') || realm.contains("..") {
		return Err(Error::ValidationError(format!("Realm has empty labels: '{}'", realm)));
	}
	Ok(())
}


// vim: ts=4
