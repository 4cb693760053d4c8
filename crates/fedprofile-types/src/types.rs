//! Common types used throughout fedprofile.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::time::SystemTime;

use crate::prelude::*;

// ProfileId //
//***********//
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(pub u32);

impl std::fmt::Display for ProfileId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

// InstId //
//********//
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstId(pub u32);

impl std::fmt::Display for InstId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

// Timestamp //
//***********//
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

impl Timestamp {
	pub fn now() -> Timestamp {
		let res = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default();
		Timestamp(i64::try_from(res.as_secs()).unwrap_or(i64::MAX))
	}
}

impl std::fmt::Display for Timestamp {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

// Level //
//*******//
/// Hierarchy level an attribute was declared at.
///
/// Variants are ordered by specificity: `Global` is the least specific,
/// `Device` the most.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
	Global,
	Federation,
	#[serde(rename = "IdP")]
	IdP,
	Profile,
	Method,
	Device,
}

impl Level {
	pub fn as_str(&self) -> &'static str {
		match self {
			Level::Global => "Global",
			Level::Federation => "Federation",
			Level::IdP => "IdP",
			Level::Profile => "Profile",
			Level::Method => "Method",
			Level::Device => "Device",
		}
	}
}

impl std::fmt::Display for Level {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl std::str::FromStr for Level {
	type Err = Error;

	fn from_str(s: &str) -> ClResult<Self> {
		match s {
			"Global" => Ok(Level::Global),
			"Federation" => Ok(Level::Federation),
			"IdP" => Ok(Level::IdP),
			"Profile" => Ok(Level::Profile),
			"Method" => Ok(Level::Method),
			"Device" => Ok(Level::Device),
			_ => Err(Error::ValidationError(format!("Unknown attribute level: {}", s))),
		}
	}
}

// AttrValue //
//***********//
/// Attribute value. The resolver never looks inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
	Bool(bool), // Must be before Int to avoid bool -> int coercion
	Int(i64),
	String(Box<str>),
}

impl AttrValue {
	pub fn as_str(&self) -> Option<&str> {
		match self {
			AttrValue::String(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			AttrValue::Bool(b) => Some(*b),
			_ => None,
		}
	}

	/// Integer view of the value. Strings holding a decimal number are accepted,
	/// since attribute rows coming from administrators are usually text.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			AttrValue::Int(i) => Some(*i),
			AttrValue::String(s) => s.trim().parse().ok(),
			AttrValue::Bool(_) => None,
		}
	}

	pub fn type_name(&self) -> &'static str {
		match self {
			AttrValue::Bool(_) => "bool",
			AttrValue::Int(_) => "int",
			AttrValue::String(_) => "string",
		}
	}
}

impl std::fmt::Display for AttrValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			AttrValue::Bool(b) => write!(f, "{}", b),
			AttrValue::Int(i) => write!(f, "{}", i),
			AttrValue::String(s) => f.write_str(s),
		}
	}
}

impl From<bool> for AttrValue {
	fn from(b: bool) -> Self {
		AttrValue::Bool(b)
	}
}

impl From<i64> for AttrValue {
	fn from(i: i64) -> Self {
		AttrValue::Int(i)
	}
}

impl From<u32> for AttrValue {
	fn from(i: u32) -> Self {
		AttrValue::Int(i64::from(i))
	}
}

impl From<&str> for AttrValue {
	fn from(s: &str) -> Self {
		AttrValue::String(s.into())
	}
}

impl From<String> for AttrValue {
	fn from(s: String) -> Self {
		AttrValue::String(s.into_boxed_str())
	}
}

// EapMethod //
//***********//
/// EAP methods a profile can offer. The discriminants are the stable ids used in storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum EapMethod {
	TtlsPap = 1,
	PeapMschapv2 = 2,
	Tls = 3,
	FastGtc = 4,
	TtlsGtc = 5,
	TtlsMschapv2 = 6,
	Pwd = 7,
	Silverbullet = 8,
}

impl EapMethod {
	pub fn id(self) -> u8 {
		self as u8
	}
}

impl From<EapMethod> for u8 {
	fn from(method: EapMethod) -> Self {
		method.id()
	}
}

impl TryFrom<u8> for EapMethod {
	type Error = Error;

	fn try_from(id: u8) -> ClResult<Self> {
		match id {
			1 => Ok(EapMethod::TtlsPap),
			2 => Ok(EapMethod::PeapMschapv2),
			3 => Ok(EapMethod::Tls),
			4 => Ok(EapMethod::FastGtc),
			5 => Ok(EapMethod::TtlsGtc),
			6 => Ok(EapMethod::TtlsMschapv2),
			7 => Ok(EapMethod::Pwd),
			8 => Ok(EapMethod::Silverbullet),
			_ => Err(Error::ValidationError(format!("Unknown EAP method id: {}", id))),
		}
	}
}

/// A method registered for a profile together with its preference (lower is preferred).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedMethod {
	pub method: EapMethod,
	pub preference: u32,
}

// AttributeRecord //
//*****************//
/// One raw attribute declaration.
///
/// `(name, row)` is unique within one level. `device == None` means the value
/// applies to every device, `eap_method == None` that it applies to every method.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeRecord {
	pub name: Box<str>,
	pub value: AttrValue,
	pub level: Option<Level>,
	#[serde(default)]
	pub row: u32,
	pub flag: Option<Box<str>>,
	pub device: Option<Box<str>>,
	#[serde(rename = "eapmethod", default, deserialize_with = "deserialize_eap_scope")]
	pub eap_method: Option<EapMethod>,
}

/// Method id `0` means the record applies to every method
fn deserialize_eap_scope<'de, D>(deserializer: D) -> Result<Option<EapMethod>, D::Error>
where
	D: serde::Deserializer<'de>,
{
	match Option::<u8>::deserialize(deserializer)? {
		None | Some(0) => Ok(None),
		Some(id) => EapMethod::try_from(id).map(Some).map_err(serde::de::Error::custom),
	}
}

impl AttributeRecord {
	pub fn new(name: impl Into<Box<str>>, value: impl Into<AttrValue>) -> Self {
		Self {
			name: name.into(),
			value: value.into(),
			level: None,
			row: 0,
			flag: None,
			device: None,
			eap_method: None,
		}
	}

	pub fn with_level(mut self, level: Level) -> Self {
		self.level = Some(level);
		self
	}

	pub fn with_row(mut self, row: u32) -> Self {
		self.row = row;
		self
	}

	pub fn with_flag(mut self, flag: impl Into<Box<str>>) -> Self {
		self.flag = Some(flag.into());
		self
	}

	pub fn with_device(mut self, device: impl Into<Box<str>>) -> Self {
		self.device = Some(device.into());
		self
	}

	pub fn with_eap_method(mut self, method: EapMethod) -> Self {
		self.eap_method = Some(method);
		self
	}

	/// Strip device and method scoping
	pub fn unscoped(mut self) -> Self {
		self.device = None;
		self.eap_method = None;
		self
	}
}

// Entities //
//**********//
/// An entity that owns attribute rows
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityRef {
	Federation(Box<str>),
	Institution(InstId),
	Profile(ProfileId),
}

impl EntityRef {
	/// Level of the attributes declared directly on this entity
	pub fn level(&self) -> Level {
		match self {
			EntityRef::Federation(_) => Level::Federation,
			EntityRef::Institution(_) => Level::IdP,
			EntityRef::Profile(_) => Level::Profile,
		}
	}
}

impl std::fmt::Display for EntityRef {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			EntityRef::Federation(code) => write!(f, "federation:{}", code),
			EntityRef::Institution(inst_id) => write!(f, "institution:{}", inst_id),
			EntityRef::Profile(profile_id) => write!(f, "profile:{}", profile_id),
		}
	}
}

/// Persisted boolean flags of a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileFlag {
	SufficientConfig,
	Showtime,
	UseAnonOuter,
}

impl ProfileFlag {
	pub fn column(&self) -> &'static str {
		match self {
			ProfileFlag::SufficientConfig => "sufficient_config",
			ProfileFlag::Showtime => "showtime",
			ProfileFlag::UseAnonOuter => "use_anon_outer",
		}
	}
}

/// Stored profile row
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileData {
	pub profile_id: ProfileId,
	pub inst_id: InstId,
	pub realm: Option<Box<str>>,
	pub use_anon_outer: bool,
	pub sufficient_config: bool,
	pub showtime: bool,
	pub updated_at: Timestamp,
}

/// Institution as known to the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Institution {
	pub inst_id: InstId,
	/// Name used when deriving realms, e.g. "example.edu"
	pub identifier: Box<str>,
	/// Federation code, e.g. "US"
	pub federation: Box<str>,
}

/// Federation as known to the directory, with its override attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Federation {
	pub code: Box<str>,
	pub attributes: Vec<AttributeRecord>,
}

impl Federation {
	/// Values of a federation attribute, in row order
	pub fn attribute_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a AttrValue> + 'a {
		self.attributes.iter().filter(move |a| a.name.as_ref() == name).map(|a| &a.value)
	}
}


// vim: ts=4
