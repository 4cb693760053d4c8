//! Level precedence resolution
//!
//! Merges the attribute declarations of two adjacent hierarchy levels. A name
//! declared at the more specific level supersedes every value of that name at
//! the less specific level, unless the name is registered as cumulative, in
//! which case the values of both levels are kept, more specific first.
//!
//! Deeper hierarchies are folded pairwise, most specific level first: the
//! output of one step is the more specific input of the next.

use std::collections::HashSet;
use std::sync::Arc;

use crate::prelude::*;
use crate::registry::FrozenAttributeRegistry;

#[derive(Debug, Clone)]
pub struct PrecedenceResolver {
	registry: Arc<FrozenAttributeRegistry>,
}

impl PrecedenceResolver {
	pub fn new(registry: Arc<FrozenAttributeRegistry>) -> Self {
		Self { registry }
	}

	pub fn registry(&self) -> &Arc<FrozenAttributeRegistry> {
		&self.registry
	}

	/// Merge `less_specific` under `more_specific`.
	///
	/// The output holds every record of `more_specific` in its original order,
	/// followed by the surviving records of `less_specific` in theirs. Survivors
	/// without a level are labeled `less_specific_level`.
	pub fn resolve(
		&self,
		more_specific: Vec<AttributeRecord>,
		less_specific: Vec<AttributeRecord>,
		less_specific_level: Level,
	) -> Vec<AttributeRecord> {
		let overridden: HashSet<Box<str>> =
			more_specific.iter().map(|rec| rec.name.clone()).collect();

		let mut result = more_specific;
		result.reserve(less_specific.len());

		let mut dropped = 0usize;
		for mut rec in less_specific {
			if overridden.contains(&rec.name) && !self.registry.is_cumulative(&rec.name) {
				dropped += 1;
				continue;
			}
			rec.level.get_or_insert(less_specific_level);
			result.push(rec);
		}

		if dropped > 0 {
			debug!("{} attribute value(s) at level {} superseded", dropped, less_specific_level);
		}
		result
	}

	/// Fold several levels into one set. `levels` runs from the most specific to the
	/// least specific; each entry is labeled with its own level where unlabeled.
	pub fn fold<I>(&self, levels: I) -> Vec<AttributeRecord>
	where
		I: IntoIterator<Item = (Level, Vec<AttributeRecord>)>,
	{
		let mut levels = levels.into_iter();
		let Some((top_level, mut acc)) = levels.next() else {
			return Vec::new();
		};
		for rec in &mut acc {
			rec.level.get_or_insert(top_level);
		}

		for (level, records) in levels {
			acc = self.resolve(acc, records, level);
		}
		acc
	}
}


// vim: ts=4
