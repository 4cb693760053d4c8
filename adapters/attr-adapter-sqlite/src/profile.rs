//! Profile rows, supported EAP methods and the installer cache

use sqlx::{SqlitePool, sqlite::SqliteQueryResult};

use fedprofile_types::prelude::*;
use fedprofile_types::types::{EapMethod, ProfileData, ProfileFlag, SupportedMethod};

use crate::{col, db_err, map_res};

/// Zero affected rows means the profile does not exist
fn expect_row(res: SqliteQueryResult) -> ClResult<()> {
	if res.rows_affected() == 0 { Err(Error::NotFound) } else { Ok(()) }
}

pub(crate) async fn create(db: &SqlitePool, profile_id: ProfileId, inst_id: InstId) -> ClResult<()> {
	sqlx::query("INSERT INTO profiles (profile_id, inst_id) VALUES (?, ?)")
		.bind(profile_id.0)
		.bind(inst_id.0)
		.execute(db)
		.await
		.map_err(db_err)?;
	Ok(())
}

pub(crate) async fn read(db: &SqlitePool, profile_id: ProfileId) -> ClResult<ProfileData> {
	let res = sqlx::query(
		"SELECT profile_id, inst_id, realm, use_anon_outer, sufficient_config, showtime, updated_at
		FROM profiles WHERE profile_id = ?",
	)
	.bind(profile_id.0)
	.fetch_one(db)
	.await;

	map_res(res, |row| {
		let realm: Option<String> = col(row, "realm")?;
		Ok(ProfileData {
			profile_id: ProfileId(col(row, "profile_id")?),
			inst_id: InstId(col(row, "inst_id")?),
			realm: realm.map(Into::into),
			use_anon_outer: col(row, "use_anon_outer")?,
			sufficient_config: col(row, "sufficient_config")?,
			showtime: col(row, "showtime")?,
			updated_at: Timestamp(col(row, "updated_at")?),
		})
	})
}

pub(crate) async fn update_flag(
	db: &SqlitePool,
	profile_id: ProfileId,
	flag: ProfileFlag,
	value: bool,
) -> ClResult<()> {
	let sql = format!("UPDATE profiles SET {} = ? WHERE profile_id = ?", flag.column());
	let res = sqlx::query(&sql)
		.bind(value)
		.bind(profile_id.0)
		.execute(db)
		.await
		.map_err(db_err)?;
	expect_row(res)
}

pub(crate) async fn set_realm(db: &SqlitePool, profile_id: ProfileId, realm: &str) -> ClResult<()> {
	let res = sqlx::query("UPDATE profiles SET realm = ? WHERE profile_id = ?")
		.bind(realm)
		.bind(profile_id.0)
		.execute(db)
		.await
		.map_err(db_err)?;
	expect_row(res)
}

pub(crate) async fn update_freshness(db: &SqlitePool, profile_id: ProfileId) -> ClResult<()> {
	let res = sqlx::query("UPDATE profiles SET updated_at = unixepoch() WHERE profile_id = ?")
		.bind(profile_id.0)
		.execute(db)
		.await
		.map_err(db_err)?;
	expect_row(res)
}

pub(crate) async fn count(db: &SqlitePool, inst_id: InstId) -> ClResult<u32> {
	let res = sqlx::query("SELECT count(*) AS cnt FROM profiles WHERE inst_id = ?")
		.bind(inst_id.0)
		.fetch_one(db)
		.await;
	map_res(res, |row| col(row, "cnt"))
}

// Supported EAP methods
//***********************
pub(crate) async fn add_supported_method(
	db: &SqlitePool,
	profile_id: ProfileId,
	method: EapMethod,
	preference: u32,
) -> ClResult<()> {
	sqlx::query("INSERT INTO supported_eap (profile_id, eap_method_id, preference) VALUES (?, ?, ?)")
		.bind(profile_id.0)
		.bind(method.id())
		.bind(preference)
		.execute(db)
		.await
		.map_err(db_err)?;
	Ok(())
}

pub(crate) async fn list_supported_methods(
	db: &SqlitePool,
	profile_id: ProfileId,
) -> ClResult<Vec<SupportedMethod>> {
	let rows = sqlx::query(
		"SELECT eap_method_id, preference FROM supported_eap WHERE profile_id = ? ORDER BY seq",
	)
	.bind(profile_id.0)
	.fetch_all(db)
	.await
	.map_err(db_err)?;

	rows.iter()
		.map(|row| {
			let method_id: u8 = col(row, "eap_method_id")?;
			Ok(SupportedMethod {
				method: EapMethod::try_from(method_id)?,
				preference: col(row, "preference")?,
			})
		})
		.collect()
}

// Installer cache
//*****************
pub(crate) async fn update_installer_cache(
	db: &SqlitePool,
	profile_id: ProfileId,
	device: &str,
	path: &str,
	mime: &str,
) -> ClResult<()> {
	sqlx::query(
		"INSERT OR REPLACE INTO installer_cache (profile_id, device_id, path, mime, created_at)
		VALUES (?, ?, ?, ?, unixepoch())",
	)
	.bind(profile_id.0)
	.bind(device)
	.bind(path)
	.bind(mime)
	.execute(db)
	.await
	.map_err(db_err)?;
	Ok(())
}

pub(crate) async fn read_installer_cache(
	db: &SqlitePool,
	profile_id: ProfileId,
	device: &str,
) -> ClResult<Option<(Box<str>, Box<str>)>> {
	let row = sqlx::query("SELECT path, mime FROM installer_cache WHERE profile_id = ? AND device_id = ?")
		.bind(profile_id.0)
		.bind(device)
		.fetch_optional(db)
		.await
		.map_err(db_err)?;

	row.map(|row| {
		let path: String = col(&row, "path")?;
		let mime: String = col(&row, "mime")?;
		Ok((path.into(), mime.into()))
	})
	.transpose()
}

// vim: ts=4
