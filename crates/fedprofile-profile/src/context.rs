//! Everything a profile needs to load itself

use std::sync::Arc;

use fedprofile_core::{ConsortiumConfig, PrecedenceResolver, RealmNameBuilder};
use fedprofile_types::attr_adapter::AttributeAdapter;
use fedprofile_types::directory_adapter::DirectoryAdapter;

use crate::prelude::*;

#[derive(Debug)]
pub struct ProfileContext {
	pub config: Arc<ConsortiumConfig>,
	pub resolver: PrecedenceResolver,
	pub realm_builder: RealmNameBuilder,
	pub attr_adapter: Arc<dyn AttributeAdapter>,
	pub directory: Arc<dyn DirectoryAdapter>,
}

impl ProfileContext {
	pub fn new(
		config: Arc<ConsortiumConfig>,
		attr_adapter: Arc<dyn AttributeAdapter>,
		directory: Arc<dyn DirectoryAdapter>,
	) -> ClResult<Self> {
		config.validate()?;
		let resolver = PrecedenceResolver::new(config.build_registry()?);
		let realm_builder = RealmNameBuilder::new(config.realm_suffix.as_str());
		Ok(Self { config, resolver, realm_builder, attr_adapter, directory })
	}
}

// vim: ts=4
