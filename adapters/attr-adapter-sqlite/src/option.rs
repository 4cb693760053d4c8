//! Attribute option rows of federations, institutions and profiles
//!
//! Values are stored as JSON text. Rows come back in row-index order and are
//! labeled with the level of the entity they are declared on; device and EAP
//! method scoping is kept on the record itself.

use sqlx::{SqlitePool, sqlite::SqliteRow};

use fedprofile_types::prelude::*;
use fedprofile_types::types::{AttrValue, AttributeRecord, EapMethod, EntityRef, Level};

use crate::{col, db_err};

/// Owner key of an option row
#[derive(Clone, Copy)]
enum Owner<'a> {
	Code(&'a str),
	Id(u32),
}

fn table(entity: &EntityRef) -> (&'static str, &'static str, Owner<'_>) {
	match entity {
		EntityRef::Federation(code) => ("federation_option", "code", Owner::Code(code)),
		EntityRef::Institution(inst_id) => ("institution_option", "inst_id", Owner::Id(inst_id.0)),
		EntityRef::Profile(profile_id) => ("profile_option", "profile_id", Owner::Id(profile_id.0)),
	}
}

/// Values written by hand may be plain text rather than JSON
fn decode_value(raw: Option<&str>) -> AttrValue {
	match raw {
		None => AttrValue::String("".into()),
		Some(raw) => serde_json::from_str(raw).unwrap_or_else(|_| AttrValue::String(raw.into())),
	}
}

fn read_record(row: &SqliteRow, level: Level) -> ClResult<AttributeRecord> {
	let name: String = col(row, "name")?;
	let value: Option<String> = col(row, "value")?;
	let row_idx: u32 = col(row, "row_idx")?;
	let flag: Option<String> = col(row, "flag")?;
	let device: Option<String> = col(row, "device_id")?;
	let eap_method_id: u8 = col(row, "eap_method_id")?;

	let mut record = AttributeRecord::new(name, decode_value(value.as_deref()))
		.with_level(level)
		.with_row(row_idx);
	if let Some(flag) = flag {
		record = record.with_flag(flag);
	}
	if let Some(device) = device {
		record = record.with_device(device);
	}
	if eap_method_id != 0 {
		record = record.with_eap_method(EapMethod::try_from(eap_method_id)?);
	}
	Ok(record)
}

pub(crate) async fn list(db: &SqlitePool, entity: &EntityRef) -> ClResult<Vec<AttributeRecord>> {
	let (table, key, owner) = table(entity);
	let sql = format!(
		"SELECT name, value, row_idx, flag, device_id, eap_method_id FROM {} WHERE {} = ?
		ORDER BY row_idx, opt_id",
		table, key
	);
	let query = sqlx::query(&sql);
	let query = match owner {
		Owner::Code(code) => query.bind(code),
		Owner::Id(id) => query.bind(id),
	};
	let rows = query.fetch_all(db).await.map_err(db_err)?;

	let level = entity.level();
	rows.iter().map(|row| read_record(row, level)).collect()
}

pub(crate) async fn insert(
	db: &SqlitePool,
	entity: &EntityRef,
	record: &AttributeRecord,
) -> ClResult<()> {
	let value = serde_json::to_string(&record.value)?;
	let (table, key, owner) = table(entity);

	if let Owner::Code(code) = owner {
		sqlx::query("INSERT OR IGNORE INTO federations (code) VALUES (?)")
			.bind(code)
			.execute(db)
			.await
			.map_err(db_err)?;
	}

	let sql = format!(
		"INSERT INTO {} ({}, name, value, row_idx, flag, device_id, eap_method_id)
		VALUES (?, ?, ?, ?, ?, ?, ?)",
		table, key
	);
	let query = sqlx::query(&sql);
	let query = match owner {
		Owner::Code(code) => query.bind(code),
		Owner::Id(id) => query.bind(id),
	};
	query
		.bind(record.name.as_ref())
		.bind(value)
		.bind(record.row)
		.bind(record.flag.as_deref())
		.bind(record.device.as_deref())
		.bind(record.eap_method.map_or(0, u8::from))
		.execute(db)
		.await
		.map_err(db_err)?;

	debug!("Stored attribute {} on {}", record.name, entity);
	Ok(())
}

// vim: ts=4
