pub use fedprofile_core::prelude::*;

// vim: ts=4
