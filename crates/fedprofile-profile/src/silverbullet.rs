//! Managed service profile
//!
//! Offers exactly one EAP method, which is certificate based, so there is no
//! outer/inner identity split and no configuration that could be missing.

use async_trait::async_trait;
use std::sync::Arc;

use fedprofile_core::config::HARDCODED_MAX_USERS;
use fedprofile_types::types::ProfileFlag;

use crate::aggregate::ProfileAggregate;
use crate::context::ProfileContext;
use crate::prelude::*;
use crate::variant::{ProfileVariant, VariantKind};

pub const DISPLAY_NAME: &str = "eduroam-as-a-service";
pub const FIXED_METHOD: EapMethod = EapMethod::Silverbullet;
pub const FIXED_PREFERENCE: u32 = 1;

#[derive(Debug)]
pub struct SilverbulletProfile {
	aggregate: ProfileAggregate,
}

impl SilverbulletProfile {
	pub async fn load(ctx: Arc<ProfileContext>, profile_id: ProfileId) -> ClResult<Self> {
		let aggregate = ProfileAggregate::load(ctx, profile_id, VariantKind::Silverbullet).await?;
		Ok(Self { aggregate })
	}

	/// Always present for this variant
	pub fn realm(&self) -> &str {
		self.aggregate.realm().unwrap_or_default()
	}

	pub fn user_quota(&self) -> u32 {
		self.aggregate.user_quota().unwrap_or(HARDCODED_MAX_USERS)
	}

	pub fn aggregate_mut(&mut self) -> &mut ProfileAggregate {
		&mut self.aggregate
	}
}

#[async_trait]
impl ProfileVariant for SilverbulletProfile {
	fn aggregate(&self) -> &ProfileAggregate {
		&self.aggregate
	}

	fn display_name(&self) -> Option<&str> {
		Some(DISPLAY_NAME)
	}

	/// Always registers the fixed method with the fixed preference. Callers
	/// must not call this twice for the same profile.
	async fn add_supported_method(&mut self, method: EapMethod, preference: u32) -> ClResult<()> {
		if method != FIXED_METHOD || preference != FIXED_PREFERENCE {
			debug!(
				"Profile {}: ignoring requested {:?}/{}, using {:?}/{}",
				self.aggregate.profile_id(),
				method,
				preference,
				FIXED_METHOD,
				FIXED_PREFERENCE
			);
		}
		self.aggregate.register_method(FIXED_METHOD, FIXED_PREFERENCE).await
	}

	/// Anonymous outer identities are always switched off
	async fn set_anonymous_id_support(&mut self, enabled: bool) -> ClResult<()> {
		if enabled {
			debug!("Profile {}: anonymous outer identity not supported", self.aggregate.profile_id());
		}
		self.aggregate.write_flag(ProfileFlag::UseAnonOuter, false).await
	}

	fn sufficient_config(&self) -> bool {
		true
	}

	fn ready_for_showtime(&self) -> bool {
		true
	}

	async fn prep_showtime(&mut self) -> ClResult<()> {
		self.aggregate.write_flag(ProfileFlag::SufficientConfig, true).await?;
		self.aggregate.write_flag(ProfileFlag::Showtime, true).await
	}

	/// Installers of this variant are never cached
	async fn update_cache(&self, _device: &str, _path: &str, _mime: &str) -> ClResult<()> {
		Ok(())
	}
}

// vim: ts=4
