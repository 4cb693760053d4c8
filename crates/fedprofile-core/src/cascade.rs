//! Cascading default lookup for scalar configuration values
//!
//! Sources are listed from the least specific to the most specific. Every source
//! is evaluated in that order and the last one that yields a value wins.

use std::fmt::Debug;

use crate::prelude::*;

/// Evaluate `sources` in order and return the last non-absent value.
///
/// Fails with `Error::NoDefaultAvailable(key)` when every source is absent.
pub fn resolve_scalar<T, I, F>(key: &str, sources: I) -> ClResult<T>
where
	I: IntoIterator<Item = F>,
	F: FnOnce() -> Option<T>,
{
	sources
		.into_iter()
		.fold(None, |winner, source| source().or(winner))
		.ok_or_else(|| Error::NoDefaultAvailable(key.to_string()))
}

type Source<'a, T> = Box<dyn FnOnce() -> Option<T> + 'a>;

/// Labeled variant of [`resolve_scalar`] that logs which source won.
///
/// ```
/// # use fedprofile_core::CascadingDefault;
/// let global: Option<u32> = Some(500);
/// let quota = CascadingDefault::new("max_users")
/// 	.source("fallback", || Some(200))
/// 	.source("global", || global)
/// 	.source("federation", || None)
/// 	.resolve();
/// assert_eq!(quota.ok(), Some(500));
/// ```
pub struct CascadingDefault<'a, T> {
	key: &'a str,
	sources: Vec<(&'static str, Source<'a, T>)>,
}

impl<'a, T: Debug> CascadingDefault<'a, T> {
	pub fn new(key: &'a str) -> Self {
		Self { key, sources: Vec::new() }
	}

	/// Append a source more specific than all sources added so far
	pub fn source<F>(mut self, label: &'static str, f: F) -> Self
	where
		F: FnOnce() -> Option<T> + 'a,
	{
		self.sources.push((label, Box::new(f)));
		self
	}

	pub fn resolve(self) -> ClResult<T> {
		let key = self.key;
		let mut winner: Option<(&'static str, T)> = None;

		for (label, source) in self.sources {
			if let Some(value) = source() {
				winner = Some((label, value));
			}
		}

		match winner {
			Some((label, value)) => {
				debug!("{} = {:?} (from {})", key, value, label);
				Ok(value)
			}
			None => {
				warn!("No source provides a value for {}", key);
				Err(Error::NoDefaultAvailable(key.to_string()))
			}
		}
	}
}


// vim: ts=4
