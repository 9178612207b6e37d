//! Models for the SWIFT code registry
//!
//! Row types as stored in `swift_codes`, the insert form, and the composite
//! shapes returned by the lookup resolver.

pub mod swift_code_models;

// Re-export commonly used types for convenience
pub use swift_code_models::{
    institution_prefix, is_headquarter_code, normalize_code, CountrySwiftCodes, HeadquarterView,
    NewSwiftCode, SwiftCode, SwiftCodeLookup, HEADQUARTER_SUFFIX, INSTITUTION_PREFIX_LEN,
};
