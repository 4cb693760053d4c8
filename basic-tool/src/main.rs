use std::{env, path, sync::Arc};

use fedprofile::prelude::*;
use fedprofile_attr_adapter_sqlite::AttrAdapterSqlite;

pub struct Config {
	pub db_path: path::PathBuf,
	pub config_file: Option<path::PathBuf>,
	pub profile_id: ProfileId,
	pub kind: VariantKind,
}

impl Config {
	fn from_env() -> ClResult<Self> {
		let profile_id = env::var("PROFILE_ID")
			.map_err(|_| Error::ConfigError("PROFILE_ID is not set".into()))?
			.parse::<u32>()
			.map_err(|_| Error::ConfigError("PROFILE_ID must be a number".into()))?;
		let kind = match env::var("PROFILE_KIND") {
			Ok(kind) => kind.parse()?,
			Err(_) => VariantKind::Silverbullet,
		};

		Ok(Config {
			db_path: path::PathBuf::from(
				env::var("DB_PATH").unwrap_or_else(|_| "./data/fedprofile.db".to_string()),
			),
			config_file: env::var("FEDPROFILE_CONFIG").ok().map(path::PathBuf::from),
			profile_id: ProfileId(profile_id),
			kind,
		})
	}
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ClResult<()> {
	fedprofile::app::init_tracing();
	let config = Config::from_env()?;

	let adapter = Arc::new(AttrAdapterSqlite::new(&config.db_path).await?);
	let mut builder = fedprofile::AppBuilder::new();
	builder.attr_adapter(adapter.clone()).directory_adapter(adapter);
	if let Some(config_file) = &config.config_file {
		builder.config_file(config_file);
	}
	let app = builder.build()?;

	let profile = app.load_profile(config.profile_id, config.kind).await?;
	println!("{}", serde_json::to_string_pretty(&profile.aggregate().summary())?);

	Ok(())
}

// vim: ts=4
