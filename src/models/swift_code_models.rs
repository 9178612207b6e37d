//! SWIFT code record types
//!
//! A SWIFT/BIC code identifies an institution by its first 8 characters;
//! the remaining characters name a branch, with `XXX` reserved for the
//! institution's headquarters.

use serde::{Deserialize, Serialize};

/// Suffix marking a headquarters code.
pub const HEADQUARTER_SUFFIX: &str = "XXX";

/// Number of leading characters shared by a headquarters and its branches.
pub const INSTITUTION_PREFIX_LEN: usize = 8;

/// Canonical form of a code or country key: trimmed and upper-cased.
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// True iff `code` ends with the headquarters suffix.
pub fn is_headquarter_code(code: &str) -> bool {
    code.ends_with(HEADQUARTER_SUFFIX)
}

/// First 8 characters of `code`, or the whole code when it is shorter.
pub fn institution_prefix(code: &str) -> &str {
    match code.char_indices().nth(INSTITUTION_PREFIX_LEN) {
        Some((idx, _)) => &code[..idx],
        None => code,
    }
}

/// Row in `swift_codes`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct SwiftCode {
    pub id: i32,
    #[serde(rename = "swiftCode")]
    pub swift_code: String,
    #[serde(rename = "bankName")]
    pub bank_name: String,
    pub address: String,
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    #[serde(rename = "countryName")]
    pub country_name: String,
    #[serde(rename = "isHeadquarter")]
    pub is_headquarter: bool,
}

impl SwiftCode {
    pub fn institution_prefix(&self) -> &str {
        institution_prefix(&self.swift_code)
    }
}

/// Insert form of a record, as read from CSV or a `POST` body.
///
/// There is no headquarter field: the flag is always derived from the code.
/// An `isHeadquarter` key in a request body is accepted and ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSwiftCode {
    #[serde(rename = "swiftCode")]
    pub swift_code: String,
    #[serde(rename = "bankName", default)]
    pub bank_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(rename = "countryISO2", default)]
    pub country_iso2: String,
    #[serde(rename = "countryName", default)]
    pub country_name: String,
}

impl NewSwiftCode {
    pub fn is_headquarter(&self) -> bool {
        is_headquarter_code(&self.swift_code)
    }

    /// Apply the same casing and trimming rules the CSV loader uses.
    pub fn normalized(self) -> Self {
        Self {
            swift_code: normalize_code(&self.swift_code),
            bank_name: self.bank_name.trim().to_string(),
            address: self.address.trim().to_string(),
            country_iso2: normalize_code(&self.country_iso2),
            country_name: normalize_code(&self.country_name),
        }
    }

    /// Materialize as a stored row with the given surrogate id.
    pub fn into_record(self, id: i32) -> SwiftCode {
        let is_headquarter = self.is_headquarter();
        SwiftCode {
            id,
            swift_code: self.swift_code,
            bank_name: self.bank_name,
            address: self.address,
            country_iso2: self.country_iso2,
            country_name: self.country_name,
            is_headquarter,
        }
    }
}

/// Headquarters record with its branches embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadquarterView {
    pub address: String,
    #[serde(rename = "bankName")]
    pub bank_name: String,
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    #[serde(rename = "countryName")]
    pub country_name: String,
    #[serde(rename = "isHeadquarter")]
    pub is_headquarter: bool,
    #[serde(rename = "swiftCode")]
    pub swift_code: String,
    pub branches: Vec<SwiftCode>,
}

impl HeadquarterView {
    pub fn new(headquarter: SwiftCode, branches: Vec<SwiftCode>) -> Self {
        Self {
            address: headquarter.address,
            bank_name: headquarter.bank_name,
            country_iso2: headquarter.country_iso2,
            country_name: headquarter.country_name,
            is_headquarter: true,
            swift_code: headquarter.swift_code,
            branches,
        }
    }
}

/// Result of resolving a single code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SwiftCodeLookup {
    /// Branch record, or a headquarters whose branch query failed.
    Record(SwiftCode),
    Headquarter(HeadquarterView),
}

impl SwiftCodeLookup {
    pub fn swift_code(&self) -> &str {
        match self {
            Self::Record(record) => &record.swift_code,
            Self::Headquarter(view) => &view.swift_code,
        }
    }

    pub fn branches(&self) -> Option<&[SwiftCode]> {
        match self {
            Self::Record(_) => None,
            Self::Headquarter(view) => Some(&view.branches),
        }
    }
}

/// All codes registered for one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountrySwiftCodes {
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    #[serde(rename = "countryName")]
    pub country_name: String,
    #[serde(rename = "swiftCodes")]
    pub swift_codes: Vec<SwiftCode>,
}
