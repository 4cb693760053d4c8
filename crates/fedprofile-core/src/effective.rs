//! Effective attribute set of a profile
//!
//! A read view built fresh on every profile load. Records keep the level they
//! came from; for any name the first record is the preferred value.

use serde::Serialize;
use std::collections::HashMap;

use crate::precedence::PrecedenceResolver;
use crate::prelude::*;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EffectiveAttributeSet {
	records: Vec<AttributeRecord>,
}

impl EffectiveAttributeSet {
	pub fn from_records(records: Vec<AttributeRecord>) -> Self {
		Self { records }
	}

	/// All values of `name`, preferred first
	pub fn get<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a AttributeRecord> + 'a {
		self.records.iter().filter(move |rec| rec.name.as_ref() == name)
	}

	pub fn first(&self, name: &str) -> Option<&AttributeRecord> {
		self.records.iter().find(|rec| rec.name.as_ref() == name)
	}

	pub fn value(&self, name: &str) -> Option<&AttrValue> {
		self.first(name).map(|rec| &rec.value)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.first(name).is_some()
	}

	/// Distinct names in order of first appearance
	pub fn names(&self) -> Vec<&str> {
		let mut seen = std::collections::HashSet::new();
		self.records.iter().map(|rec| rec.name.as_ref()).filter(|name| seen.insert(*name)).collect()
	}

	pub fn iter(&self) -> impl Iterator<Item = &AttributeRecord> {
		self.records.iter()
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	pub fn into_records(self) -> Vec<AttributeRecord> {
		self.records
	}

	pub fn into_map(self) -> HashMap<Box<str>, Vec<AttributeRecord>> {
		let mut map: HashMap<Box<str>, Vec<AttributeRecord>> = HashMap::new();
		for rec in self.records {
			map.entry(rec.name.clone()).or_default().push(rec);
		}
		map
	}

	/// Narrow the set to one device and one EAP method.
	///
	/// Device-scoped records override method-scoped ones, which override
	/// unscoped ones. Records scoped to another device or method are left out.
	pub fn for_context(
		&self,
		device: Option<&str>,
		method: Option<EapMethod>,
		resolver: &PrecedenceResolver,
	) -> EffectiveAttributeSet {
		let mut device_scoped = Vec::new();
		let mut method_scoped = Vec::new();
		let mut general = Vec::new();

		for rec in &self.records {
			match (rec.device.as_deref(), rec.eap_method) {
				(None, None) => general.push(rec.clone()),
				(None, Some(m)) if Some(m) == method => method_scoped.push(rec.clone()),
				(Some(d), m) if Some(d) == device && (m.is_none() || m == method) => {
					device_scoped.push(rec.clone());
				}
				_ => {}
			}
		}

		EffectiveAttributeSet::from_records(resolver.fold([
			(Level::Device, device_scoped),
			(Level::Method, method_scoped),
			(Level::Profile, general),
		]))
	}
}

impl<'a> IntoIterator for &'a EffectiveAttributeSet {
	type Item = &'a AttributeRecord;
	type IntoIter = std::slice::Iter<'a, AttributeRecord>;

	fn into_iter(self) -> Self::IntoIter {
		self.records.iter()
	}
}


// vim: ts=4
