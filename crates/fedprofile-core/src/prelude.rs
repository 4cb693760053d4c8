pub use fedprofile_types::prelude::*;
pub use fedprofile_types::types::{AttrValue, AttributeRecord, EapMethod, Level};

// vim: ts=4
