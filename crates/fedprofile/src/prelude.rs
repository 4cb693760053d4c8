pub use fedprofile_types::prelude::*;
pub use fedprofile_types::types::{AttrValue, AttributeRecord, EapMethod, Level};

pub use fedprofile_profile::{ProfileVariant, VariantKind};

// vim: ts=4
