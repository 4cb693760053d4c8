//! Per-profile user quota

use fedprofile_core::CascadingDefault;
use fedprofile_core::config::{ConsortiumConfig, HARDCODED_MAX_USERS};
use fedprofile_core::core_attributes::{ATTR_MAX_USERS, FED_ATTR_MAX_USERS};
use fedprofile_types::types::Federation;

use crate::prelude::*;

/// Hard-coded fallback, then the consortium default, then the federation override.
pub fn resolve_max_users(config: &ConsortiumConfig, federation: &Federation) -> ClResult<u32> {
	let fed_override = federation
		.attribute_values(FED_ATTR_MAX_USERS)
		.next()
		.map(|value| {
			value.as_int().and_then(|i| u32::try_from(i).ok()).ok_or_else(|| {
				Error::ValidationError(format!(
					"Federation {} has an invalid {}: '{}'",
					federation.code, FED_ATTR_MAX_USERS, value
				))
			})
		})
		.transpose()?;

	CascadingDefault::new(ATTR_MAX_USERS)
		.source("hardcoded", || Some(HARDCODED_MAX_USERS))
		.source("consortium", || config.default_max_users)
		.source("federation", || fed_override)
		.resolve()
}


// vim: ts=4
