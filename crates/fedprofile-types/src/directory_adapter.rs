//! Adapter for federation and institution directory lookups.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;
use crate::types::{Federation, Institution};

#[async_trait]
pub trait DirectoryAdapter: Debug + Send + Sync {
	async fn get_institution(&self, inst_id: InstId) -> ClResult<Institution>;

	/// Returns the federation with its override attributes
	async fn get_federation(&self, code: &str) -> ClResult<Federation>;
}

// vim: ts=4
