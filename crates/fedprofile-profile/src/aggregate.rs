//! Profile aggregate
//!
//! Loading a profile fetches its own attribute rows and those of its owning
//! institution, federation and the consortium, resolves the user quota and the
//! realm, builds the internal attribute list from them and folds everything
//! into one effective attribute set.

use serde::Serialize;
use std::sync::Arc;

use fedprofile_core::core_attributes::ATTR_REALM;
use fedprofile_core::{EffectiveAttributeSet, realm};
use fedprofile_types::types::{
	EntityRef, Institution, ProfileData, ProfileFlag, SupportedMethod,
};

use crate::context::ProfileContext;
use crate::eap;
use crate::internal::{InternalValues, internal_attributes};
use crate::prelude::*;
use crate::quota;
use crate::variant::VariantKind;

#[derive(Debug)]
pub struct ProfileAggregate {
	ctx: Arc<ProfileContext>,
	kind: VariantKind,
	profile_id: ProfileId,
	institution: Institution,
	realm: Option<Box<str>>,
	user_quota: Option<u32>,
	profile_count: u32,
	use_anon_outer: bool,
	sufficient_config: bool,
	showtime: bool,
	attributes: EffectiveAttributeSet,
	supported_methods: Vec<SupportedMethod>,
}

/// Serializable snapshot of a loaded profile
#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummary<'a> {
	pub profile_id: ProfileId,
	pub inst_id: InstId,
	pub kind: VariantKind,
	pub realm: Option<&'a str>,
	pub user_quota: Option<u32>,
	pub use_anon_outer: bool,
	pub sufficient_config: bool,
	pub showtime: bool,
	pub supported_methods: &'a [SupportedMethod],
	pub attributes: &'a EffectiveAttributeSet,
}

impl ProfileAggregate {
	pub async fn load(
		ctx: Arc<ProfileContext>,
		profile_id: ProfileId,
		kind: VariantKind,
	) -> ClResult<Self> {
		debug!("--- BEGIN loading profile {} ({:?}) ---", profile_id, kind);

		let data = ctx.attr_adapter.read_profile(profile_id).await?;
		let institution = ctx.directory.get_institution(data.inst_id).await?;
		let federation = ctx.directory.get_federation(&institution.federation).await?;

		// Quota and realm feed the internal attribute list, so they go first.
		// Only the managed variant has a user quota.
		let user_quota = match kind {
			VariantKind::Silverbullet => Some(quota::resolve_max_users(&ctx.config, &federation)?),
			VariantKind::MultiMethod => None,
		};
		let realm = match kind {
			VariantKind::Silverbullet => {
				Some(Self::stored_or_derived_realm(&ctx, &data, &institution).await?)
			}
			VariantKind::MultiMethod => data.realm.clone(),
		};
		let use_anon_outer = match kind {
			VariantKind::Silverbullet => false,
			VariantKind::MultiMethod => data.use_anon_outer,
		};
		let profile_count = ctx.attr_adapter.count_profiles(data.inst_id).await?;

		let identity = realm.as_deref().map(|r| match kind {
			VariantKind::Silverbullet => realm::identity_realm(r),
			VariantKind::MultiMethod => r.to_string(),
		});
		let mut profile_level = internal_attributes(&InternalValues {
			profile_count,
			realm: identity.as_deref(),
			use_anon_outer,
			anon_local_value: &ctx.config.anon_local_value,
			max_users: user_quota,
		});
		// Device and method scoped rows only override within their own context
		let (profile_general, profile_scoped): (Vec<_>, Vec<_>) = ctx
			.attr_adapter
			.fetch_attributes(&EntityRef::Profile(profile_id))
			.await?
			.into_iter()
			.partition(|rec| rec.device.is_none() && rec.eap_method.is_none());
		profile_level.extend(profile_general);

		// Institution rows never carry device or method scoping into a profile
		let idp_level: Vec<AttributeRecord> = ctx
			.attr_adapter
			.fetch_attributes(&EntityRef::Institution(data.inst_id))
			.await?
			.into_iter()
			.map(AttributeRecord::unscoped)
			.collect();
		let institution_level = ctx.resolver.fold([
			(Level::IdP, idp_level),
			(Level::Federation, federation.attributes),
			(Level::Global, ctx.config.global_records()),
		]);
		let mut records = ctx.resolver.resolve(profile_level, institution_level, Level::IdP);
		records.extend(profile_scoped.into_iter().map(|mut rec| {
			rec.level.get_or_insert(Level::Profile);
			rec
		}));
		let attributes = EffectiveAttributeSet::from_records(records);

		let mut supported_methods = ctx.attr_adapter.list_supported_methods(profile_id).await?;
		eap::sort_by_preference(&mut supported_methods);

		debug!(
			"--- END loading profile {}: {} attribute value(s), {} method(s) ---",
			profile_id,
			attributes.len(),
			supported_methods.len()
		);

		Ok(Self {
			ctx,
			kind,
			profile_id,
			institution,
			realm,
			user_quota,
			profile_count,
			use_anon_outer,
			sufficient_config: data.sufficient_config,
			showtime: data.showtime,
			attributes,
			supported_methods,
		})
	}

	async fn stored_or_derived_realm(
		ctx: &ProfileContext,
		data: &ProfileData,
		institution: &Institution,
	) -> ClResult<Box<str>> {
		if let Some(stored) = &data.realm {
			return Ok(stored.clone());
		}

		let derived =
			ctx.realm_builder.build(&institution.identifier, data.profile_id, &institution.federation);
		realm::validate_realm(&derived)?;
		ctx.attr_adapter.set_realm(data.profile_id, &derived).await?;
		info!("Profile {}: derived realm {}", data.profile_id, derived);
		Ok(derived.into_boxed_str())
	}

	pub fn context(&self) -> &Arc<ProfileContext> {
		&self.ctx
	}

	pub fn kind(&self) -> VariantKind {
		self.kind
	}

	pub fn profile_id(&self) -> ProfileId {
		self.profile_id
	}

	pub fn inst_id(&self) -> InstId {
		self.institution.inst_id
	}

	pub fn institution(&self) -> &Institution {
		&self.institution
	}

	pub fn realm(&self) -> Option<&str> {
		self.realm.as_deref()
	}

	/// Realm in full user-identity form, e.g. `opaquehash@<realm>`
	pub fn identity_realm(&self) -> Option<String> {
		self.realm.as_deref().map(realm::identity_realm)
	}

	/// Present for managed profiles only
	pub fn user_quota(&self) -> Option<u32> {
		self.user_quota
	}

	pub fn profile_count(&self) -> u32 {
		self.profile_count
	}

	pub fn use_anon_outer(&self) -> bool {
		self.use_anon_outer
	}

	pub fn sufficient_config(&self) -> bool {
		self.sufficient_config
	}

	pub fn showtime(&self) -> bool {
		self.showtime
	}

	pub fn attributes(&self) -> &EffectiveAttributeSet {
		&self.attributes
	}

	pub fn supported_methods(&self) -> &[SupportedMethod] {
		&self.supported_methods
	}

	/// Effective attributes for one device and EAP method
	pub fn attributes_for(&self, device: Option<&str>, method: Option<EapMethod>) -> EffectiveAttributeSet {
		self.attributes.for_context(device, method, &self.ctx.resolver)
	}

	pub fn summary(&self) -> ProfileSummary<'_> {
		ProfileSummary {
			profile_id: self.profile_id,
			inst_id: self.institution.inst_id,
			kind: self.kind,
			realm: self.realm.as_deref(),
			user_quota: self.user_quota,
			use_anon_outer: self.use_anon_outer,
			sufficient_config: self.sufficient_config,
			showtime: self.showtime,
			supported_methods: &self.supported_methods,
			attributes: &self.attributes,
		}
	}

	/// Deliberately replace the realm. Automatic derivation never does this.
	pub async fn set_realm(&mut self, new_realm: &str) -> ClResult<()> {
		realm::validate_realm(new_realm)?;
		self.ctx.attr_adapter.set_realm(self.profile_id, new_realm).await?;
		info!("Profile {}: realm set to {}", self.profile_id, new_realm);

		let mut records = std::mem::take(&mut self.attributes).into_records();
		records.retain(|rec| rec.name.as_ref() != ATTR_REALM);
		records.insert(0, AttributeRecord::new(ATTR_REALM, new_realm).with_level(Level::Profile));
		self.attributes = EffectiveAttributeSet::from_records(records);
		self.realm = Some(new_realm.into());
		Ok(())
	}

	/// Derive the realm again from the current identity and persist it
	pub async fn reset_realm(&mut self) -> ClResult<()> {
		let federation = self.institution.federation.clone();
		let derived =
			self.ctx.realm_builder.build(&self.institution.identifier, self.profile_id, &federation);
		warn!("Profile {}: resetting realm, previously issued credentials may break", self.profile_id);
		self.set_realm(&derived).await
	}

	pub(crate) async fn write_flag(&mut self, flag: ProfileFlag, value: bool) -> ClResult<()> {
		self.ctx.attr_adapter.update_flag(self.profile_id, flag, value).await?;
		match flag {
			ProfileFlag::SufficientConfig => self.sufficient_config = value,
			ProfileFlag::Showtime => self.showtime = value,
			ProfileFlag::UseAnonOuter => self.use_anon_outer = value,
		}
		Ok(())
	}

	pub(crate) async fn register_method(&mut self, method: EapMethod, preference: u32) -> ClResult<()> {
		let registered =
			eap::register_method(self.ctx.attr_adapter.as_ref(), self.profile_id, method, preference)
				.await?;
		self.supported_methods.push(registered);
		eap::sort_by_preference(&mut self.supported_methods);
		Ok(())
	}
}

// vim: ts=4
