//! Managed service profile tests
//!
//! Loading, quota and realm resolution, attribute precedence and the
//! administrative operations of the single-method variant.

mod common;

use common::*;

use fedprofile_core::ConsortiumConfig;
use fedprofile_core::config::GlobalAttribute;
use fedprofile_core::core_attributes::{
	ATTR_MAX_USERS, ATTR_PROFILE_COUNT, ATTR_REALM, ATTR_USE_ANON_OUTER, FED_ATTR_MAX_USERS,
};
use fedprofile_profile::{ProfileVariant, SilverbulletProfile, VariantKind, load_profile};
use fedprofile_types::error::Error;
use fedprofile_types::types::{AttrValue, AttributeRecord, EapMethod, EntityRef, Level, ProfileFlag, ProfileId};

fn fed() -> EntityRef {
	EntityRef::Federation("US".into())
}

fn inst() -> EntityRef {
	EntityRef::Institution(INST)
}

fn prof() -> EntityRef {
	EntityRef::Profile(PROFILE)
}

#[tokio::test]
async fn test_scenario_quota_and_realm() {
	let store = MemoryStore::scenario();
	let ctx = context(&store, scenario_config());

	let profile = SilverbulletProfile::load(ctx, PROFILE).await.expect("Should load profile");

	assert_eq!(profile.user_quota(), 500);
	assert_eq!(profile.realm(), "example.edu-7.us.cat.example");
	assert_eq!(
		profile.aggregate().identity_realm().as_deref(),
		Some("opaquehash@example.edu-7.us.cat.example")
	);
	assert_eq!(profile.display_name(), Some("eduroam-as-a-service"));
	assert!(profile.sufficient_config());
	assert!(profile.ready_for_showtime());
}

#[tokio::test]
async fn test_federation_quota_override() {
	let store = MemoryStore::scenario();
	store.add_attribute(fed(), AttributeRecord::new(FED_ATTR_MAX_USERS, "50"));
	let ctx = context(&store, scenario_config());

	let profile = SilverbulletProfile::load(ctx, PROFILE).await.expect("Should load profile");

	assert_eq!(profile.user_quota(), 50);
	assert_eq!(profile.aggregate().attributes().value(ATTR_MAX_USERS), Some(&AttrValue::Int(50)));
}

#[tokio::test]
async fn test_hardcoded_quota_without_any_config() {
	let store = MemoryStore::scenario();
	let config = ConsortiumConfig { realm_suffix: ".cat.example".into(), ..ConsortiumConfig::default() };
	let ctx = context(&store, config);

	let profile = SilverbulletProfile::load(ctx, PROFILE).await.expect("Should load profile");
	assert_eq!(profile.user_quota(), 200);
}

#[tokio::test]
async fn test_institution_attribute_inherited() {
	let store = MemoryStore::scenario();
	store.add_attribute(inst(), AttributeRecord::new("display:name", "Example U"));
	let ctx = context(&store, scenario_config());

	let profile = SilverbulletProfile::load(ctx, PROFILE).await.expect("Should load profile");
	let attrs = profile.aggregate().attributes();

	let values: Vec<&AttributeRecord> = attrs.get("display:name").collect();
	assert_eq!(values.len(), 1);
	assert_eq!(values[0].value, AttrValue::from("Example U"));
	assert_eq!(values[0].level, Some(Level::IdP));
}

#[tokio::test]
async fn test_profile_attribute_overrides_institution() {
	let store = MemoryStore::scenario();
	store.add_attribute(inst(), AttributeRecord::new("display:name", "Example U"));
	store.add_attribute(inst(), AttributeRecord::new("display:name", "Example University").with_row(1));
	store.add_attribute(prof(), AttributeRecord::new("display:name", "eduroam-as-a-service"));
	let ctx = context(&store, scenario_config());

	let profile = SilverbulletProfile::load(ctx, PROFILE).await.expect("Should load profile");
	let attrs = profile.aggregate().attributes();

	let values: Vec<&AttrValue> = attrs.get("display:name").map(|r| &r.value).collect();
	assert_eq!(values, vec![&AttrValue::from("eduroam-as-a-service")]);
	assert_eq!(attrs.first("display:name").and_then(|r| r.level), Some(Level::Profile));
}

#[tokio::test]
async fn test_configured_cumulative_attribute() {
	let store = MemoryStore::scenario();
	store.add_attribute(inst(), AttributeRecord::new("support:email", "help@example.edu"));
	store.add_attribute(prof(), AttributeRecord::new("support:email", "eaas@example.edu"));
	let config =
		ConsortiumConfig { cumulative_attributes: vec!["support:*".into()], ..scenario_config() };
	let ctx = context(&store, config);

	let profile = SilverbulletProfile::load(ctx, PROFILE).await.expect("Should load profile");

	let values: Vec<String> =
		profile.aggregate().attributes().get("support:email").map(|r| r.value.to_string()).collect();
	assert_eq!(values, vec!["eaas@example.edu", "help@example.edu"]);
}

#[tokio::test]
async fn test_global_and_federation_levels() {
	let store = MemoryStore::scenario();
	store.add_attribute(fed(), AttributeRecord::new("media:logo", "fed-logo"));
	let config = ConsortiumConfig {
		global_attributes: vec![
			GlobalAttribute { name: "media:logo".into(), value: "global-logo".into() },
			GlobalAttribute { name: "support:url".into(), value: "https://help.example".into() },
		],
		..scenario_config()
	};
	let ctx = context(&store, config);

	let profile = SilverbulletProfile::load(ctx, PROFILE).await.expect("Should load profile");
	let attrs = profile.aggregate().attributes();

	assert_eq!(attrs.get("media:logo").count(), 1);
	assert_eq!(attrs.first("media:logo").and_then(|r| r.level), Some(Level::Federation));
	assert_eq!(attrs.first("support:url").and_then(|r| r.level), Some(Level::Global));
}

#[tokio::test]
async fn test_internal_attributes() {
	let store = MemoryStore::scenario();
	store.add_profile(ProfileId(8));
	let ctx = context(&store, scenario_config());

	let profile = SilverbulletProfile::load(ctx, PROFILE).await.expect("Should load profile");
	let attrs = profile.aggregate().attributes();

	assert_eq!(attrs.value(ATTR_PROFILE_COUNT), Some(&AttrValue::Int(2)));
	assert_eq!(attrs.value(ATTR_REALM), Some(&AttrValue::from("example.edu-7.us.cat.example")));
	assert_eq!(attrs.value(ATTR_USE_ANON_OUTER), Some(&AttrValue::Bool(false)));
	assert_eq!(attrs.value(ATTR_MAX_USERS), Some(&AttrValue::Int(500)));
}

#[tokio::test]
async fn test_realm_persisted_once() {
	let store = MemoryStore::scenario();
	let ctx = context(&store, scenario_config());

	let first = SilverbulletProfile::load(ctx.clone(), PROFILE).await.expect("Should load profile");
	assert_eq!(store.state.read().realm_writes, 1);
	assert_eq!(
		store.profile(PROFILE).and_then(|p| p.realm).as_deref(),
		Some("example.edu-7.us.cat.example")
	);

	// The institution gets renamed: the issued realm must not move
	if let Some(inst) = store.state.write().institutions.get_mut(&INST) {
		inst.identifier = "renamed.edu".into();
	}
	let second = SilverbulletProfile::load(ctx, PROFILE).await.expect("Should reload profile");

	assert_eq!(second.realm(), first.realm());
	assert_eq!(store.state.read().realm_writes, 1);
}

#[tokio::test]
async fn test_explicit_realm_override_and_reset() {
	let store = MemoryStore::scenario();
	let ctx = context(&store, scenario_config());
	let mut profile = SilverbulletProfile::load(ctx, PROFILE).await.expect("Should load profile");

	profile.aggregate_mut().set_realm("custom.example.edu").await.expect("Should set realm");
	assert_eq!(profile.realm(), "custom.example.edu");
	assert_eq!(
		profile.aggregate().attributes().value(ATTR_REALM),
		Some(&AttrValue::from("custom.example.edu"))
	);
	assert_eq!(profile.aggregate().attributes().get(ATTR_REALM).count(), 1);
	assert_eq!(store.profile(PROFILE).and_then(|p| p.realm).as_deref(), Some("custom.example.edu"));

	let res = profile.aggregate_mut().set_realm("user@bad").await;
	assert!(matches!(res, Err(Error::ValidationError(_))));
	assert_eq!(profile.realm(), "custom.example.edu");

	profile.aggregate_mut().reset_realm().await.expect("Should reset realm");
	assert_eq!(profile.realm(), "example.edu-7.us.cat.example");
}

#[tokio::test]
async fn test_add_supported_method_is_fixed() {
	let store = MemoryStore::scenario();
	let ctx = context(&store, scenario_config());
	let mut profile = SilverbulletProfile::load(ctx, PROFILE).await.expect("Should load profile");

	profile.add_supported_method(EapMethod::PeapMschapv2, 5).await.expect("Should add method");

	let methods = profile.aggregate().supported_methods();
	assert_eq!(methods.len(), 1);
	assert_eq!(methods[0].method, EapMethod::Silverbullet);
	assert_eq!(methods[0].preference, 1);

	let state = store.state.read();
	assert_eq!(state.methods.get(&PROFILE).map(Vec::len), Some(1));
	assert_eq!(state.freshness_bumps, 1);
}

#[tokio::test]
async fn test_anonymous_id_support_always_disabled() {
	let store = MemoryStore::scenario();
	let ctx = context(&store, scenario_config());
	let mut profile = SilverbulletProfile::load(ctx, PROFILE).await.expect("Should load profile");

	profile.set_anonymous_id_support(true).await.expect("Should update flag");

	assert!(!profile.aggregate().use_anon_outer());
	assert_eq!(store.profile(PROFILE).map(|p| p.use_anon_outer), Some(false));
	assert_eq!(
		store.state.read().flag_writes,
		vec![(PROFILE, ProfileFlag::UseAnonOuter, false)]
	);
}

#[tokio::test]
async fn test_prep_showtime_sets_both_flags() {
	let store = MemoryStore::scenario();
	let ctx = context(&store, scenario_config());
	let mut profile = SilverbulletProfile::load(ctx, PROFILE).await.expect("Should load profile");

	profile.prep_showtime().await.expect("Should prep showtime");

	let stored = store.profile(PROFILE).expect("Profile should exist");
	assert!(stored.sufficient_config);
	assert!(stored.showtime);
	assert!(profile.aggregate().showtime());
}

#[tokio::test]
async fn test_update_cache_is_noop() {
	let store = MemoryStore::scenario();
	let ctx = context(&store, scenario_config());
	let profile = SilverbulletProfile::load(ctx, PROFILE).await.expect("Should load profile");

	profile
		.update_cache("android_recent", "/tmp/x.eap-config", "application/eap-config")
		.await
		.expect("Should succeed");
	assert!(store.state.read().installers.is_empty());
}

#[tokio::test]
async fn test_missing_profile_fails_outright() {
	let store = MemoryStore::scenario();
	let ctx = context(&store, scenario_config());

	let res = load_profile(ctx, ProfileId(99), VariantKind::Silverbullet).await;
	assert!(matches!(res, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_invalid_federation_quota_fails_load() {
	let store = MemoryStore::scenario();
	store.add_attribute(fed(), AttributeRecord::new(FED_ATTR_MAX_USERS, "unlimited"));
	let ctx = context(&store, scenario_config());

	let res = SilverbulletProfile::load(ctx, PROFILE).await;
	assert!(matches!(res, Err(Error::ValidationError(_))));
	assert_eq!(store.state.read().realm_writes, 0);
}

#[tokio::test]
async fn test_per_device_view() {
	let store = MemoryStore::scenario();
	store.add_attribute(prof(), AttributeRecord::new("support:url", "https://p.example"));
	store.add_attribute(
		prof(),
		AttributeRecord::new("support:url", "https://android.example")
			.with_level(Level::Device)
			.with_device("android_recent"),
	);
	let ctx = context(&store, scenario_config());
	let profile = SilverbulletProfile::load(ctx, PROFILE).await.expect("Should load profile");

	let android = profile.aggregate().attributes_for(Some("android_recent"), Some(EapMethod::Silverbullet));
	assert_eq!(android.value("support:url"), Some(&AttrValue::from("https://android.example")));
	assert_eq!(android.get("support:url").count(), 1);

	let other = profile.aggregate().attributes_for(Some("apple_ios"), None);
	assert_eq!(other.value("support:url"), Some(&AttrValue::from("https://p.example")));
}

#[tokio::test]
async fn test_device_override_keeps_institution_value_elsewhere() {
	let store = MemoryStore::scenario();
	store.add_attribute(
		EntityRef::Institution(INST),
		AttributeRecord::new("support:url", "https://idp.example"),
	);
	store.add_attribute(
		prof(),
		AttributeRecord::new("support:url", "https://android.example").with_device("android_recent"),
	);
	let ctx = context(&store, scenario_config());
	let profile = SilverbulletProfile::load(ctx, PROFILE).await.expect("Should load profile");

	let other = profile.aggregate().attributes_for(Some("apple_ios"), None);
	assert_eq!(other.value("support:url"), Some(&AttrValue::from("https://idp.example")));
	assert_eq!(other.first("support:url").and_then(|r| r.level), Some(Level::IdP));

	let android = profile.aggregate().attributes_for(Some("android_recent"), None);
	assert_eq!(android.value("support:url"), Some(&AttrValue::from("https://android.example")));
	assert_eq!(android.get("support:url").count(), 1);
}

// vim: ts=4
