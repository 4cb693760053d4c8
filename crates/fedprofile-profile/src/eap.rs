//! Supported EAP method registration

use fedprofile_types::attr_adapter::AttributeAdapter;
use fedprofile_types::types::SupportedMethod;

use crate::prelude::*;

/// Insert one supported method row and bump the profile's freshness.
/// Repeated registration of the same method is not prevented here.
pub async fn register_method(
	adapter: &dyn AttributeAdapter,
	profile_id: ProfileId,
	method: EapMethod,
	preference: u32,
) -> ClResult<SupportedMethod> {
	adapter.add_supported_method(profile_id, method, preference).await?;
	adapter.update_freshness(profile_id).await?;
	info!("Profile {}: registered EAP method {:?} (preference {})", profile_id, method, preference);
	Ok(SupportedMethod { method, preference })
}

/// Order by preference, lowest first. Equal preferences keep insertion order.
pub fn sort_by_preference(methods: &mut [SupportedMethod]) {
	methods.sort_by_key(|m| m.preference);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_sort_is_stable() {
		let mut methods = vec![
			SupportedMethod { method: EapMethod::Pwd, preference: 2 },
			SupportedMethod { method: EapMethod::Tls, preference: 1 },
			SupportedMethod { method: EapMethod::TtlsPap, preference: 2 },
			SupportedMethod { method: EapMethod::PeapMschapv2, preference: 1 },
		];
		sort_by_preference(&mut methods);
		let order: Vec<EapMethod> = methods.iter().map(|m| m.method).collect();
		assert_eq!(
			order,
			vec![EapMethod::Tls, EapMethod::PeapMschapv2, EapMethod::Pwd, EapMethod::TtlsPap]
		);
	}
}

// vim: ts=4
