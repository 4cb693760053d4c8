//! Federation and institution directory

use sqlx::SqlitePool;

use fedprofile_types::prelude::*;
use fedprofile_types::types::{EntityRef, Federation, Institution};

use crate::{col, db_err, map_res, option};

pub(crate) async fn create_federation(db: &SqlitePool, code: &str) -> ClResult<()> {
	sqlx::query("INSERT OR IGNORE INTO federations (code) VALUES (?)")
		.bind(code)
		.execute(db)
		.await
		.map_err(db_err)?;
	Ok(())
}

pub(crate) async fn create_institution(
	db: &SqlitePool,
	inst_id: InstId,
	identifier: &str,
	federation: &str,
) -> ClResult<()> {
	create_federation(db, federation).await?;
	sqlx::query("INSERT INTO institutions (inst_id, identifier, federation) VALUES (?, ?, ?)")
		.bind(inst_id.0)
		.bind(identifier)
		.bind(federation)
		.execute(db)
		.await
		.map_err(db_err)?;
	Ok(())
}

pub(crate) async fn read_institution(db: &SqlitePool, inst_id: InstId) -> ClResult<Institution> {
	let res = sqlx::query("SELECT inst_id, identifier, federation FROM institutions WHERE inst_id = ?")
		.bind(inst_id.0)
		.fetch_one(db)
		.await;

	map_res(res, |row| {
		let identifier: String = col(row, "identifier")?;
		let federation: String = col(row, "federation")?;
		Ok(Institution {
			inst_id: InstId(col(row, "inst_id")?),
			identifier: identifier.into(),
			federation: federation.into(),
		})
	})
}

pub(crate) async fn read_federation(db: &SqlitePool, code: &str) -> ClResult<Federation> {
	let res = sqlx::query("SELECT code FROM federations WHERE code = ?")
		.bind(code)
		.fetch_one(db)
		.await;
	let code: String = map_res(res, |row| col(row, "code"))?;

	let attributes = option::list(db, &EntityRef::Federation(code.as_str().into())).await?;
	Ok(Federation { code: code.into(), attributes })
}

// vim: ts=4
