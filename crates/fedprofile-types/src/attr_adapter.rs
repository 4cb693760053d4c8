//! Adapter that stores attribute rows, profile rows and supported EAP methods.
//!
//! The resolution engine only ever reads a fresh snapshot through this trait
//! and issues a few targeted writes. Implementations are expected to serialize
//! writes themselves (transactions or a single connection).

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;
use crate::types::{AttributeRecord, EapMethod, EntityRef, ProfileData, ProfileFlag, SupportedMethod};

#[async_trait]
pub trait AttributeAdapter: Debug + Send + Sync {
	/// Reads the stored profile row
	async fn read_profile(&self, profile_id: ProfileId) -> ClResult<ProfileData>;

	/// Returns the attribute rows declared directly on an entity, in row order.
	/// Records come back labeled with the entity's level.
	async fn fetch_attributes(&self, entity: &EntityRef) -> ClResult<Vec<AttributeRecord>>;

	/// Stores one attribute row on an entity
	async fn write_attribute(&self, entity: &EntityRef, record: &AttributeRecord) -> ClResult<()>;

	/// Sets one of the persisted boolean flags of a profile
	async fn update_flag(&self, profile_id: ProfileId, flag: ProfileFlag, value: bool)
		-> ClResult<()>;

	/// Persists the realm of a profile
	async fn set_realm(&self, profile_id: ProfileId, realm: &str) -> ClResult<()>;

	/// Inserts a supported EAP method row. Duplicates are not checked here.
	async fn add_supported_method(
		&self,
		profile_id: ProfileId,
		method: EapMethod,
		preference: u32,
	) -> ClResult<()>;

	/// Lists supported methods in insertion order
	async fn list_supported_methods(&self, profile_id: ProfileId) -> ClResult<Vec<SupportedMethod>>;

	/// Number of profiles an institution owns
	async fn count_profiles(&self, inst_id: InstId) -> ClResult<u32>;

	/// Marks the profile as changed now
	async fn update_freshness(&self, profile_id: ProfileId) -> ClResult<()>;

	/// Records where a generated installer for a device can be found
	async fn update_installer_cache(
		&self,
		profile_id: ProfileId,
		device: &str,
		path: &str,
		mime: &str,
	) -> ClResult<()>;
}

// vim: ts=4
