//! Field validation and normalization against EPC069-12 constraints.
//!
//! Every function is pure: input in, normalized value or a
//! [`ValidationError`] naming the violated rule out.

use epc_qr_config::OverflowPolicy;
use epc_qr_types::Euro;

use crate::ValidationError;

/// Generic IBAN length bounds; no per-country table is maintained.
const IBAN_MIN_LEN: usize = 15;
const IBAN_MAX_LEN: usize = 34;

const STRUCTURED_REFERENCE_MAX_LEN: usize = 35;

/// Characters the EPC069-12 Latin character set permits in text fields.
fn is_epc_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            ' ' | '/' | '-' | '?' | ':' | '(' | ')' | '.' | ',' | '\'' | '+'
        )
}

/// ISO 7064 MOD-97-10 remainder of an alphanumeric string, letters mapped
/// A=10..Z=35. Callers must pass uppercase letters and digits only.
fn mod97(s: &str) -> u32 {
    let mut rem: u32 = 0;
    for b in s.bytes() {
        if b.is_ascii_digit() {
            rem = (rem * 10 + (b - b'0') as u32) % 97;
        } else {
            rem = (rem * 100 + (b - b'A') as u32 + 10) % 97;
        }
    }
    rem
}

/// Move the four leading characters (country code + check digits) to the end.
fn rotate(s: &str) -> String {
    format!("{}{}", &s[4..], &s[..4])
}

/// Strips whitespace, uppercases, then checks shape and the MOD-97-10
/// checksum. Returns the normalized IBAN.
pub fn iban(raw: &str) -> Result<String, ValidationError> {
    let normalized: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if normalized.len() < IBAN_MIN_LEN || normalized.len() > IBAN_MAX_LEN {
        return Err(ValidationError::InvalidIban(format!(
            "length {} is outside {IBAN_MIN_LEN}-{IBAN_MAX_LEN}",
            normalized.len()
        )));
    }
    if !normalized.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidIban(
            "only letters and digits are allowed".to_string(),
        ));
    }
    let bytes = normalized.as_bytes();
    if !bytes[..2].iter().all(u8::is_ascii_uppercase) {
        return Err(ValidationError::InvalidIban(
            "country code must be two letters".to_string(),
        ));
    }
    if !bytes[2..4].iter().all(u8::is_ascii_digit) {
        return Err(ValidationError::InvalidIban(
            "check digits must be numeric".to_string(),
        ));
    }
    if mod97(&rotate(&normalized)) != 1 {
        return Err(ValidationError::InvalidIban(
            "checksum mismatch".to_string(),
        ));
    }
    Ok(normalized)
}

/// Structural BIC check: 4 letters (bank), 2 letters (country), 2
/// alphanumeric (location), optional 3 alphanumeric (branch). No directory
/// lookup.
pub fn bic(raw: &str) -> Result<String, ValidationError> {
    let normalized = raw.trim().to_ascii_uppercase();
    let bytes = normalized.as_bytes();
    if bytes.len() != 8 && bytes.len() != 11 {
        return Err(ValidationError::InvalidBic(
            "must be 8 or 11 characters".to_string(),
        ));
    }
    if !bytes[..6].iter().all(u8::is_ascii_uppercase) {
        return Err(ValidationError::InvalidBic(
            "bank and country codes must be letters".to_string(),
        ));
    }
    if !bytes[6..].iter().all(u8::is_ascii_alphanumeric) {
        return Err(ValidationError::InvalidBic(
            "location and branch must be alphanumeric".to_string(),
        ));
    }
    Ok(normalized)
}

/// Checks magnitude and precision. Zero is the distinct "variable amount"
/// state, returned as `None`.
pub fn amount(value: f64) -> Result<Option<Euro>, ValidationError> {
    let amount = Euro::try_from_f64(value)
        .map_err(|reason| ValidationError::InvalidAmount(reason.to_string()))?;
    if amount.is_negative() {
        return Err(ValidationError::InvalidAmount(
            "must not be negative".to_string(),
        ));
    }
    if amount.is_zero() {
        return Ok(None);
    }
    if amount > Euro::MAX {
        return Err(ValidationError::InvalidAmount(format!(
            "exceeds {}",
            Euro::MAX.payload_string()
        )));
    }
    Ok(Some(amount))
}

/// Trims, checks the EPC character set and the field length. Overlong text
/// is rejected or truncated per the configured policy.
pub fn text(
    field: &'static str,
    raw: &str,
    max_len: usize,
    policy: OverflowPolicy,
) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if let Some(bad) = trimmed.chars().find(|c| !is_epc_char(*c)) {
        return Err(ValidationError::InvalidText {
            field,
            reason: format!("character {bad:?} is outside the EPC character set"),
        });
    }
    if trimmed.chars().count() > max_len {
        return match policy {
            OverflowPolicy::Reject => Err(ValidationError::InvalidText {
                field,
                reason: format!("longer than {max_len} characters"),
            }),
            OverflowPolicy::Truncate => Ok(trimmed.chars().take(max_len).collect()),
        };
    }
    Ok(trimmed.to_string())
}

/// [`text`] plus a non-empty requirement.
pub fn required_text(
    field: &'static str,
    raw: &str,
    max_len: usize,
    policy: OverflowPolicy,
) -> Result<String, ValidationError> {
    let value = text(field, raw, max_len, policy)?;
    if value.is_empty() {
        return Err(ValidationError::InvalidText {
            field,
            reason: "is required".to_string(),
        });
    }
    Ok(value)
}

/// Four uppercase ASCII letters. Codes outside the known table pass through,
/// the ISO 20022 set is open ended.
pub fn purpose(raw: &str) -> Result<String, ValidationError> {
    let normalized = raw.trim().to_ascii_uppercase();
    if normalized.len() != 4 || !normalized.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(ValidationError::InvalidText {
            field: "purpose code",
            reason: "must be exactly four letters".to_string(),
        });
    }
    Ok(normalized)
}

/// Structured creditor reference. Grouping spaces are stripped and the value
/// uppercased; ISO 11649 `RF` references are additionally checksum-verified
/// with the same MOD-97-10 rotation as IBANs. Overlong references are always
/// rejected, truncation would corrupt them.
pub fn structured_reference(raw: &str) -> Result<String, ValidationError> {
    let normalized: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    let checked = text(
        "structured reference",
        &normalized,
        STRUCTURED_REFERENCE_MAX_LEN,
        OverflowPolicy::Reject,
    )?;
    if checked.starts_with("RF") {
        if checked.len() < 5 || !checked.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ValidationError::InvalidText {
                field: "structured reference",
                reason: "RF references must be at least 5 alphanumeric characters".to_string(),
            });
        }
        if mod97(&rotate(&checked)) != 1 {
            return Err(ValidationError::InvalidText {
                field: "structured reference",
                reason: "RF checksum mismatch".to_string(),
            });
        }
    }
    Ok(checked)
}
