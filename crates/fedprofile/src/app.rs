//! App builder - wires configuration and adapters into a profile context

use std::{path::PathBuf, sync::Arc};

use crate::attr_adapter::AttributeAdapter;
use crate::directory_adapter::DirectoryAdapter;
use crate::prelude::*;
use fedprofile_core::ConsortiumConfig;
use fedprofile_profile::{ProfileContext, load_profile};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug)]
pub struct AppState {
	pub ctx: Arc<ProfileContext>,
}

pub type App = Arc<AppState>;

impl AppState {
	pub fn config(&self) -> &ConsortiumConfig {
		&self.ctx.config
	}

	pub fn context(&self) -> &Arc<ProfileContext> {
		&self.ctx
	}

	/// Load a profile with its effective attribute set
	pub async fn load_profile(
		&self,
		profile_id: ProfileId,
		kind: VariantKind,
	) -> ClResult<Box<dyn ProfileVariant>> {
		load_profile(self.ctx.clone(), profile_id, kind).await
	}
}

pub struct Adapters {
	pub attr_adapter: Option<Arc<dyn AttributeAdapter>>,
	pub directory_adapter: Option<Arc<dyn DirectoryAdapter>>,
}

pub struct AppBuilder {
	config: Option<ConsortiumConfig>,
	config_file: Option<PathBuf>,
	adapters: Adapters,
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl AppBuilder {
	pub fn new() -> Self {
		AppBuilder {
			config: None,
			config_file: None,
			adapters: Adapters { attr_adapter: None, directory_adapter: None },
		}
	}

	// Opts
	pub fn config(&mut self, config: ConsortiumConfig) -> &mut Self {
		self.config = Some(config);
		self
	}
	pub fn config_file(&mut self, path: impl Into<PathBuf>) -> &mut Self {
		self.config_file = Some(path.into());
		self
	}

	// Adapters
	pub fn attr_adapter(&mut self, attr_adapter: Arc<dyn AttributeAdapter>) -> &mut Self {
		self.adapters.attr_adapter = Some(attr_adapter);
		self
	}
	pub fn directory_adapter(&mut self, directory_adapter: Arc<dyn DirectoryAdapter>) -> &mut Self {
		self.adapters.directory_adapter = Some(directory_adapter);
		self
	}

	/// An explicit config wins over a config file; with neither the defaults apply.
	pub fn build(&mut self) -> ClResult<App> {
		let config = match (self.config.take(), &self.config_file) {
			(Some(config), _) => config,
			(None, Some(path)) => ConsortiumConfig::from_file(path)?,
			(None, None) => ConsortiumConfig::default(),
		};
		let attr_adapter = self
			.adapters
			.attr_adapter
			.take()
			.ok_or_else(|| Error::ConfigError("no attribute adapter".into()))?;
		let directory_adapter = self
			.adapters
			.directory_adapter
			.take()
			.ok_or_else(|| Error::ConfigError("no directory adapter".into()))?;

		let ctx = ProfileContext::new(Arc::new(config), attr_adapter, directory_adapter)?;
		info!("fedprofile V{} ready, realm suffix {}", VERSION, ctx.config.realm_suffix);
		Ok(Arc::new(AppState { ctx: Arc::new(ctx) }))
	}
}

/// Initialize logging from `RUST_LOG`
pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_target(false)
		.try_init();
}

// vim: ts=4
