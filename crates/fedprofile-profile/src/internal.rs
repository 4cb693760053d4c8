//! Synthetic attributes computed on profile load

use fedprofile_core::core_attributes::{
	ATTR_ANON_LOCAL_VALUE, ATTR_MAX_USERS, ATTR_PROFILE_COUNT, ATTR_REALM, ATTR_USE_ANON_OUTER,
};
use fedprofile_core::realm;

use crate::prelude::*;

/// Values the internal attribute list is built from. Realm and quota must
/// already be resolved.
#[derive(Debug, Clone)]
pub struct InternalValues<'a> {
	pub profile_count: u32,
	/// Full identity realm (`local@domain`) or bare realm
	pub realm: Option<&'a str>,
	pub use_anon_outer: bool,
	pub anon_local_value: &'a str,
	pub max_users: Option<u32>,
}

pub fn internal_attributes(values: &InternalValues<'_>) -> Vec<AttributeRecord> {
	let mut attrs: Vec<(&str, AttrValue)> = vec![(ATTR_PROFILE_COUNT, values.profile_count.into())];
	if let Some(identity) = values.realm {
		attrs.push((ATTR_REALM, realm::realm_domain(identity).into()));
	}
	attrs.push((ATTR_USE_ANON_OUTER, values.use_anon_outer.into()));
	attrs.push((ATTR_ANON_LOCAL_VALUE, values.anon_local_value.into()));
	if let Some(max_users) = values.max_users {
		attrs.push((ATTR_MAX_USERS, max_users.into()));
	}

	attrs
		.into_iter()
		.map(|(name, value)| AttributeRecord::new(name, value).with_level(Level::Profile))
		.collect()
}


// vim: ts=4
