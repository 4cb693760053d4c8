//! Administrator-configured profile with any number of EAP methods

use async_trait::async_trait;
use std::sync::Arc;

use fedprofile_types::types::ProfileFlag;

use crate::aggregate::ProfileAggregate;
use crate::context::ProfileContext;
use crate::prelude::*;
use crate::variant::{ProfileVariant, VariantKind};

/// Attribute holding the administrator-chosen profile name
pub const ATTR_PROFILE_NAME: &str = "profile:name";

#[derive(Debug)]
pub struct MultiMethodProfile {
	aggregate: ProfileAggregate,
}

impl MultiMethodProfile {
	pub async fn load(ctx: Arc<ProfileContext>, profile_id: ProfileId) -> ClResult<Self> {
		let aggregate = ProfileAggregate::load(ctx, profile_id, VariantKind::MultiMethod).await?;
		Ok(Self { aggregate })
	}

	pub fn aggregate_mut(&mut self) -> &mut ProfileAggregate {
		&mut self.aggregate
	}
}

#[async_trait]
impl ProfileVariant for MultiMethodProfile {
	fn aggregate(&self) -> &ProfileAggregate {
		&self.aggregate
	}

	fn display_name(&self) -> Option<&str> {
		self.aggregate.attributes().value(ATTR_PROFILE_NAME).and_then(AttrValue::as_str)
	}

	/// Preferences are taken as given. Methods sharing a preference keep the
	/// order they were added in.
	async fn add_supported_method(&mut self, method: EapMethod, preference: u32) -> ClResult<()> {
		self.aggregate.register_method(method, preference).await
	}

	async fn set_anonymous_id_support(&mut self, enabled: bool) -> ClResult<()> {
		self.aggregate.write_flag(ProfileFlag::UseAnonOuter, enabled).await
	}

	fn sufficient_config(&self) -> bool {
		!self.aggregate.supported_methods().is_empty()
	}

	fn ready_for_showtime(&self) -> bool {
		self.sufficient_config()
	}

	async fn prep_showtime(&mut self) -> ClResult<()> {
		let ready = self.ready_for_showtime();
		self.aggregate.write_flag(ProfileFlag::SufficientConfig, ready).await?;
		if ready {
			self.aggregate.write_flag(ProfileFlag::Showtime, true).await?;
		}
		Ok(())
	}

	async fn update_cache(&self, device: &str, path: &str, mime: &str) -> ClResult<()> {
		self.aggregate
			.context()
			.attr_adapter
			.update_installer_cache(self.aggregate.profile_id(), device, path, mime)
			.await
	}
}

// vim: ts=4
