//! Row normalization for the bank-code CSV export.
//!
//! Column layout (only the positions we read):
//!
//! | idx | column       |
//! |-----|--------------|
//! | 0   | country ISO2 |
//! | 1   | SWIFT code   |
//! | 3   | bank name    |
//! | 4   | address      |
//! | 6   | country name |

use std::borrow::Cow;

use thiserror::Error;

use crate::models::{normalize_code, NewSwiftCode};

const COUNTRY_ISO2_IDX: usize = 0;
const SWIFT_CODE_IDX: usize = 1;
const BANK_NAME_IDX: usize = 3;
const ADDRESS_IDX: usize = 4;
const COUNTRY_NAME_IDX: usize = 6;

/// Minimum number of fields a data row must carry.
pub const MIN_FIELDS: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected at least {expected} fields, found {found}: {fields:?}")]
pub struct MalformedRecord {
    pub expected: usize,
    pub found: usize,
    pub fields: Vec<String>,
}

pub fn normalize_fields(fields: &[&str]) -> Result<NewSwiftCode, MalformedRecord> {
    if fields.len() < MIN_FIELDS {
        return Err(MalformedRecord {
            expected: MIN_FIELDS,
            found: fields.len(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        });
    }

    Ok(NewSwiftCode {
        swift_code: normalize_code(fields[SWIFT_CODE_IDX]),
        bank_name: fields[BANK_NAME_IDX].trim().to_string(),
        address: fields[ADDRESS_IDX].trim().to_string(),
        country_iso2: normalize_code(fields[COUNTRY_ISO2_IDX]),
        country_name: normalize_code(fields[COUNTRY_NAME_IDX]),
    })
}

/// Normalize a raw CSV row. Bytes that are not UTF-8 are decoded lossily;
/// callers that must reject them check that every field is valid UTF-8.
pub fn normalize_record(record: &csv::ByteRecord) -> Result<NewSwiftCode, MalformedRecord> {
    let decoded: Vec<Cow<'_, str>> = record.iter().map(String::from_utf8_lossy).collect();
    let fields: Vec<&str> = decoded.iter().map(|f| f.as_ref()).collect();
    normalize_fields(&fields)
}
