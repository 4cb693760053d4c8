//! Behavior that differs between kinds of profiles

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::aggregate::ProfileAggregate;
use crate::context::ProfileContext;
use crate::multi_method::MultiMethodProfile;
use crate::prelude::*;
use crate::silverbullet::SilverbulletProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantKind {
	/// Managed service profile: one fixed EAP method, derived realm
	Silverbullet,
	/// Administrator-configured profile with any number of EAP methods
	MultiMethod,
}

impl std::str::FromStr for VariantKind {
	type Err = Error;

	fn from_str(s: &str) -> ClResult<Self> {
		match s {
			"silverbullet" => Ok(VariantKind::Silverbullet),
			"multi_method" => Ok(VariantKind::MultiMethod),
			_ => Err(Error::ValidationError(format!("Unknown profile kind: {}", s))),
		}
	}
}

#[async_trait]
pub trait ProfileVariant: std::fmt::Debug + Send + Sync {
	fn aggregate(&self) -> &ProfileAggregate;

	fn kind(&self) -> VariantKind {
		self.aggregate().kind()
	}

	fn display_name(&self) -> Option<&str>;

	/// Register a supported EAP method
	async fn add_supported_method(&mut self, method: EapMethod, preference: u32) -> ClResult<()>;

	async fn set_anonymous_id_support(&mut self, enabled: bool) -> ClResult<()>;

	/// Whether the stored configuration is complete enough to generate installers
	fn sufficient_config(&self) -> bool;

	/// Whether there is enough to show the profile to end users
	fn ready_for_showtime(&self) -> bool;

	/// Persist the sufficient-config and showtime flags
	async fn prep_showtime(&mut self) -> ClResult<()>;

	/// Record the location of a freshly generated installer
	async fn update_cache(&self, device: &str, path: &str, mime: &str) -> ClResult<()>;
}

/// Load a profile as the given variant
pub async fn load_profile(
	ctx: Arc<ProfileContext>,
	profile_id: ProfileId,
	kind: VariantKind,
) -> ClResult<Box<dyn ProfileVariant>> {
	let profile: Box<dyn ProfileVariant> = match kind {
		VariantKind::Silverbullet => Box::new(SilverbulletProfile::load(ctx, profile_id).await?),
		VariantKind::MultiMethod => Box::new(MultiMethodProfile::load(ctx, profile_id).await?),
	};
	Ok(profile)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_kind_from_str() {
		assert_eq!("silverbullet".parse::<VariantKind>().ok(), Some(VariantKind::Silverbullet));
		assert_eq!("multi_method".parse::<VariantKind>().ok(), Some(VariantKind::MultiMethod));
		assert!(matches!("managed".parse::<VariantKind>(), Err(Error::ValidationError(_))));
	}
}

// vim: ts=4
