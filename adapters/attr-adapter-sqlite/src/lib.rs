//! SQLite-backed attribute and directory adapter
//!
//! Stores federations, institutions and profiles together with their option
//! rows, the supported EAP methods of each profile and the installer cache.

#![forbid(unsafe_code)]

mod directory;
mod option;
mod profile;
mod schema;

use async_trait::async_trait;
use sqlx::{
	Decode, Row, Sqlite, Type,
	sqlite::{self, SqlitePool, SqliteRow},
};
use std::path::Path;

use fedprofile_types::{
	attr_adapter::AttributeAdapter,
	directory_adapter::DirectoryAdapter,
	prelude::*,
	types::{
		AttributeRecord, EapMethod, EntityRef, Federation, Institution, ProfileData, ProfileFlag,
		SupportedMethod,
	},
};

use crate::schema::init_db;

// Helper functions
//******************
fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

/// Maps a single-row query result, turning a missing row into `NotFound`
pub(crate) fn map_res<T, F>(row: Result<SqliteRow, sqlx::Error>, f: F) -> ClResult<T>
where
	F: FnOnce(&SqliteRow) -> ClResult<T>,
{
	match row {
		Ok(row) => f(&row),
		Err(sqlx::Error::RowNotFound) => Err(Error::NotFound),
		Err(err) => {
			inspect(&err);
			Err(Error::DbError)
		}
	}
}

/// Reads one column of a row
pub(crate) fn col<'r, T>(row: &'r SqliteRow, name: &str) -> ClResult<T>
where
	T: Decode<'r, Sqlite> + Type<Sqlite>,
{
	row.try_get(name).inspect_err(inspect).map_err(|_| Error::DbError)
}

pub(crate) fn db_err(err: sqlx::Error) -> Error {
	inspect(&err);
	Error::DbError
}

#[derive(Debug)]
pub struct AttrAdapterSqlite {
	db: SqlitePool,
}

impl AttrAdapterSqlite {
	pub async fn new(path: impl AsRef<Path>) -> ClResult<Self> {
		if let Some(parent) = path.as_ref().parent().filter(|p| !p.as_os_str().is_empty()) {
			tokio::fs::create_dir_all(parent).await?;
		}

		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path.as_ref())
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.map_err(db_err)?;

		init_db(&db).await.map_err(db_err)?;
		debug!("Attribute database opened at {}", path.as_ref().display());

		Ok(Self { db })
	}

	// Seeding
	//*********
	pub async fn create_federation(&self, code: &str) -> ClResult<()> {
		directory::create_federation(&self.db, code).await
	}

	pub async fn create_institution(
		&self,
		inst_id: InstId,
		identifier: &str,
		federation: &str,
	) -> ClResult<()> {
		directory::create_institution(&self.db, inst_id, identifier, federation).await
	}

	pub async fn create_profile(&self, profile_id: ProfileId, inst_id: InstId) -> ClResult<()> {
		profile::create(&self.db, profile_id, inst_id).await
	}

	/// Path and MIME type of the cached installer of a device, if any
	pub async fn read_installer_cache(
		&self,
		profile_id: ProfileId,
		device: &str,
	) -> ClResult<Option<(Box<str>, Box<str>)>> {
		profile::read_installer_cache(&self.db, profile_id, device).await
	}
}

#[async_trait]
impl AttributeAdapter for AttrAdapterSqlite {
	async fn read_profile(&self, profile_id: ProfileId) -> ClResult<ProfileData> {
		profile::read(&self.db, profile_id).await
	}

	async fn fetch_attributes(&self, entity: &EntityRef) -> ClResult<Vec<AttributeRecord>> {
		option::list(&self.db, entity).await
	}

	async fn write_attribute(&self, entity: &EntityRef, record: &AttributeRecord) -> ClResult<()> {
		option::insert(&self.db, entity, record).await
	}

	async fn update_flag(
		&self,
		profile_id: ProfileId,
		flag: ProfileFlag,
		value: bool,
	) -> ClResult<()> {
		profile::update_flag(&self.db, profile_id, flag, value).await
	}

	async fn set_realm(&self, profile_id: ProfileId, realm: &str) -> ClResult<()> {
		profile::set_realm(&self.db, profile_id, realm).await
	}

	async fn add_supported_method(
		&self,
		profile_id: ProfileId,
		method: EapMethod,
		preference: u32,
	) -> ClResult<()> {
		profile::add_supported_method(&self.db, profile_id, method, preference).await
	}

	async fn list_supported_methods(&self, profile_id: ProfileId) -> ClResult<Vec<SupportedMethod>> {
		profile::list_supported_methods(&self.db, profile_id).await
	}

	async fn count_profiles(&self, inst_id: InstId) -> ClResult<u32> {
		profile::count(&self.db, inst_id).await
	}

	async fn update_freshness(&self, profile_id: ProfileId) -> ClResult<()> {
		profile::update_freshness(&self.db, profile_id).await
	}

	async fn update_installer_cache(
		&self,
		profile_id: ProfileId,
		device: &str,
		path: &str,
		mime: &str,
	) -> ClResult<()> {
		profile::update_installer_cache(&self.db, profile_id, device, path, mime).await
	}
}

#[async_trait]
impl DirectoryAdapter for AttrAdapterSqlite {
	async fn get_institution(&self, inst_id: InstId) -> ClResult<Institution> {
		directory::read_institution(&self.db, inst_id).await
	}

	async fn get_federation(&self, code: &str) -> ClResult<Federation> {
		directory::read_federation(&self.db, code).await
	}
}

// vim: ts=4
