//! Common test utilities and helpers
//!
//! In-memory implementation of the storage and directory adapters plus the
//! fixture most tests start from: institution `example.edu` in federation
//! `US`, owning profile 7.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use fedprofile_core::ConsortiumConfig;
use fedprofile_profile::ProfileContext;
use fedprofile_types::attr_adapter::AttributeAdapter;
use fedprofile_types::directory_adapter::DirectoryAdapter;
use fedprofile_types::error::{ClResult, Error};
use fedprofile_types::types::{
	AttributeRecord, EapMethod, EntityRef, Federation, InstId, Institution, ProfileData,
	ProfileFlag, ProfileId, SupportedMethod, Timestamp,
};

pub const INST: InstId = InstId(1);
pub const PROFILE: ProfileId = ProfileId(7);

#[derive(Debug, Default)]
pub struct State {
	pub profiles: HashMap<ProfileId, ProfileData>,
	pub institutions: HashMap<InstId, Institution>,
	pub attributes: HashMap<EntityRef, Vec<AttributeRecord>>,
	pub methods: HashMap<ProfileId, Vec<SupportedMethod>>,
	pub installers: Vec<(ProfileId, String, String, String)>,
	pub realm_writes: u32,
	pub flag_writes: Vec<(ProfileId, ProfileFlag, bool)>,
	pub freshness_bumps: u32,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
	pub state: RwLock<State>,
}

impl MemoryStore {
	/// Institution `example.edu` (federation `US`) with one profile and no attributes
	pub fn scenario() -> Arc<Self> {
		let store = Self::default();
		{
			let mut state = store.state.write();
			state.institutions.insert(
				INST,
				Institution { inst_id: INST, identifier: "example.edu".into(), federation: "US".into() },
			);
			state.profiles.insert(PROFILE, profile_data(PROFILE, INST));
		}
		Arc::new(store)
	}

	pub fn add_profile(&self, profile_id: ProfileId) {
		self.state.write().profiles.insert(profile_id, profile_data(profile_id, INST));
	}

	pub fn add_attribute(&self, entity: EntityRef, record: AttributeRecord) {
		self.state.write().attributes.entry(entity).or_default().push(record);
	}

	pub fn profile(&self, profile_id: ProfileId) -> Option<ProfileData> {
		self.state.read().profiles.get(&profile_id).cloned()
	}
}

fn profile_data(profile_id: ProfileId, inst_id: InstId) -> ProfileData {
	ProfileData {
		profile_id,
		inst_id,
		realm: None,
		use_anon_outer: true,
		sufficient_config: false,
		showtime: false,
		updated_at: Timestamp(0),
	}
}

#[async_trait]
impl AttributeAdapter for MemoryStore {
	async fn read_profile(&self, profile_id: ProfileId) -> ClResult<ProfileData> {
		self.state.read().profiles.get(&profile_id).cloned().ok_or(Error::NotFound)
	}

	async fn fetch_attributes(&self, entity: &EntityRef) -> ClResult<Vec<AttributeRecord>> {
		let level = entity.level();
		Ok(self
			.state
			.read()
			.attributes
			.get(entity)
			.cloned()
			.unwrap_or_default()
			.into_iter()
			.map(|mut rec| {
				rec.level.get_or_insert(level);
				rec
			})
			.collect())
	}

	async fn write_attribute(&self, entity: &EntityRef, record: &AttributeRecord) -> ClResult<()> {
		self.add_attribute(entity.clone(), record.clone());
		Ok(())
	}

	async fn update_flag(&self, profile_id: ProfileId, flag: ProfileFlag, value: bool) -> ClResult<()> {
		let mut state = self.state.write();
		let profile = state.profiles.get_mut(&profile_id).ok_or(Error::NotFound)?;
		match flag {
			ProfileFlag::SufficientConfig => profile.sufficient_config = value,
			ProfileFlag::Showtime => profile.showtime = value,
			ProfileFlag::UseAnonOuter => profile.use_anon_outer = value,
		}
		state.flag_writes.push((profile_id, flag, value));
		Ok(())
	}

	async fn set_realm(&self, profile_id: ProfileId, realm: &str) -> ClResult<()> {
		let mut state = self.state.write();
		let profile = state.profiles.get_mut(&profile_id).ok_or(Error::NotFound)?;
		profile.realm = Some(realm.into());
		state.realm_writes += 1;
		Ok(())
	}

	async fn add_supported_method(
		&self,
		profile_id: ProfileId,
		method: EapMethod,
		preference: u32,
	) -> ClResult<()> {
		self.state
			.write()
			.methods
			.entry(profile_id)
			.or_default()
			.push(SupportedMethod { method, preference });
		Ok(())
	}

	async fn list_supported_methods(&self, profile_id: ProfileId) -> ClResult<Vec<SupportedMethod>> {
		Ok(self.state.read().methods.get(&profile_id).cloned().unwrap_or_default())
	}

	async fn count_profiles(&self, inst_id: InstId) -> ClResult<u32> {
		let count = self.state.read().profiles.values().filter(|p| p.inst_id == inst_id).count();
		Ok(u32::try_from(count).unwrap_or(u32::MAX))
	}

	async fn update_freshness(&self, profile_id: ProfileId) -> ClResult<()> {
		let mut state = self.state.write();
		let profile = state.profiles.get_mut(&profile_id).ok_or(Error::NotFound)?;
		profile.updated_at = Timestamp::now();
		state.freshness_bumps += 1;
		Ok(())
	}

	async fn update_installer_cache(
		&self,
		profile_id: ProfileId,
		device: &str,
		path: &str,
		mime: &str,
	) -> ClResult<()> {
		self.state.write().installers.push((profile_id, device.into(), path.into(), mime.into()));
		Ok(())
	}
}

#[async_trait]
impl DirectoryAdapter for MemoryStore {
	async fn get_institution(&self, inst_id: InstId) -> ClResult<Institution> {
		self.state.read().institutions.get(&inst_id).cloned().ok_or(Error::NotFound)
	}

	async fn get_federation(&self, code: &str) -> ClResult<Federation> {
		let attributes = self.fetch_attributes(&EntityRef::Federation(code.into())).await?;
		Ok(Federation { code: code.into(), attributes })
	}
}

/// Config of the reference scenario: suffix `.cat.example`, consortium quota 500
pub fn scenario_config() -> ConsortiumConfig {
	ConsortiumConfig {
		default_max_users: Some(500),
		realm_suffix: ".cat.example".into(),
		..ConsortiumConfig::default()
	}
}

pub fn context(store: &Arc<MemoryStore>, config: ConsortiumConfig) -> Arc<ProfileContext> {
	setup_test_logging();
	let ctx = ProfileContext::new(Arc::new(config), store.clone(), store.clone())
		.expect("Failed to build profile context");
	Arc::new(ctx)
}

pub fn setup_test_logging() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_max_level(tracing::Level::DEBUG)
		.try_init();
}

// vim: ts=4
