//! Database schema initialization
//!
//! Option tables share one layout: an attribute name, its JSON-encoded value,
//! a row index for multi-valued attributes and optional device and EAP method
//! scoping. `eap_method_id = 0` means the row applies to every method.

use sqlx::SqlitePool;

/// Initialize the database schema with all required tables and indexes
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Federations
	//*************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS federations (
		code text NOT NULL,
		PRIMARY KEY(code)
	)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS federation_option (
		opt_id integer NOT NULL,
		code text NOT NULL,
		name text NOT NULL,
		value text,
		row_idx integer NOT NULL DEFAULT 0,
		flag text,
		device_id text,
		eap_method_id integer NOT NULL DEFAULT 0,
		PRIMARY KEY(opt_id)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_federation_option_code ON federation_option(code)")
		.execute(&mut *tx)
		.await?;

	// Institutions
	//**************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS institutions (
		inst_id integer NOT NULL,
		identifier text NOT NULL,
		federation text NOT NULL,
		PRIMARY KEY(inst_id)
	)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS institution_option (
		opt_id integer NOT NULL,
		inst_id integer NOT NULL,
		name text NOT NULL,
		value text,
		row_idx integer NOT NULL DEFAULT 0,
		flag text,
		device_id text,
		eap_method_id integer NOT NULL DEFAULT 0,
		PRIMARY KEY(opt_id)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE INDEX IF NOT EXISTS idx_institution_option_inst_id ON institution_option(inst_id)",
	)
	.execute(&mut *tx)
	.await?;

	// Profiles
	//**********
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS profiles (
		profile_id integer NOT NULL,
		inst_id integer NOT NULL,
		realm text,
		use_anon_outer boolean NOT NULL DEFAULT 1,
		sufficient_config boolean NOT NULL DEFAULT 0,
		showtime boolean NOT NULL DEFAULT 0,
		updated_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(profile_id)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_profiles_inst_id ON profiles(inst_id)")
		.execute(&mut *tx)
		.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS profile_option (
		opt_id integer NOT NULL,
		profile_id integer NOT NULL,
		name text NOT NULL,
		value text,
		row_idx integer NOT NULL DEFAULT 0,
		flag text,
		device_id text,
		eap_method_id integer NOT NULL DEFAULT 0,
		PRIMARY KEY(opt_id)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE INDEX IF NOT EXISTS idx_profile_option_profile_id ON profile_option(profile_id)",
	)
	.execute(&mut *tx)
	.await?;

	// EAP methods and installers
	//****************************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS supported_eap (
		seq integer NOT NULL,
		profile_id integer NOT NULL,
		eap_method_id integer NOT NULL,
		preference integer NOT NULL,
		PRIMARY KEY(seq)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE INDEX IF NOT EXISTS idx_supported_eap_profile_id ON supported_eap(profile_id)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS installer_cache (
		profile_id integer NOT NULL,
		device_id text NOT NULL,
		path text NOT NULL,
		mime text NOT NULL,
		created_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(profile_id, device_id)
	) WITHOUT ROWID",
	)
	.execute(&mut *tx)
	.await?;

	tx.commit().await?;

	Ok(())
}

// vim: ts=4
