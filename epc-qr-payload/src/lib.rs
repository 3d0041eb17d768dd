mod payload;
pub mod validate;

use epc_qr_config::OverflowPolicy;
use epc_qr_types::Euro;
use serde::{Deserialize, Serialize};

pub use payload::{EpcPayload, MAX_PAYLOAD_BYTES};

/// A payment request as it arrives from the caller, unvalidated.
///
/// `beneficiary_name` and `beneficiary_iban` are required, everything else
/// is optional. A missing or zero `amount` means "variable amount".
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PaymentRequest {
    pub beneficiary_name: String,
    pub beneficiary_iban: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remittance_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_reference: Option<String>,
}

impl PaymentRequest {
    /// Validates and normalizes every field, short-circuiting on the first
    /// violation so the caller learns which field broke which rule.
    pub fn validate(&self, policy: OverflowPolicy) -> Result<ValidatedPayment, ValidationError> {
        let beneficiary_name =
            validate::required_text("beneficiary name", &self.beneficiary_name, 70, policy)?;
        let beneficiary_iban = validate::iban(&self.beneficiary_iban)?;
        let bic = match non_empty(self.bic.as_deref()) {
            Some(raw) => Some(validate::bic(raw)?),
            None => None,
        };
        let amount = validate::amount(self.amount.unwrap_or(0.0))?;
        let purpose_code = match non_empty(self.purpose_code.as_deref()) {
            Some(raw) => Some(validate::purpose(raw)?),
            None => None,
        };
        let remittance_info = match non_empty(self.remittance_info.as_deref()) {
            Some(raw) => Some(validate::text("remittance info", raw, 140, policy)?),
            None => None,
        };
        let structured_reference = match non_empty(self.structured_reference.as_deref()) {
            Some(raw) => Some(validate::structured_reference(raw)?),
            None => None,
        };
        Ok(ValidatedPayment::new(
            beneficiary_name,
            beneficiary_iban,
            bic,
            amount,
            purpose_code,
            remittance_info,
            structured_reference,
        ))
    }

    /// Validate and build the EPC069-12 record in one go.
    pub fn to_payload(&self, policy: OverflowPolicy) -> Result<EpcPayload, ValidationError> {
        EpcPayload::build(&self.validate(policy)?)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// A payment request after validation: all fields normalized, the amount
/// resolved to fixed or variable. Immutable once produced.
#[derive(Debug, Clone)]
pub struct ValidatedPayment {
    beneficiary_name: String,
    beneficiary_iban: String,
    bic: Option<String>,
    amount: Option<Euro>,
    purpose_code: Option<String>,
    remittance_info: Option<String>,
    structured_reference: Option<String>,
}

impl ValidatedPayment {
    pub(crate) fn new(
        beneficiary_name: String,
        beneficiary_iban: String,
        bic: Option<String>,
        amount: Option<Euro>,
        purpose_code: Option<String>,
        remittance_info: Option<String>,
        structured_reference: Option<String>,
    ) -> Self {
        Self {
            beneficiary_name,
            beneficiary_iban,
            bic,
            amount,
            purpose_code,
            remittance_info,
            structured_reference,
        }
    }

    pub fn beneficiary_name(&self) -> &str {
        &self.beneficiary_name
    }

    pub fn beneficiary_iban(&self) -> &str {
        &self.beneficiary_iban
    }

    pub fn bic(&self) -> Option<&str> {
        self.bic.as_deref()
    }

    /// `None` means variable amount.
    pub fn amount(&self) -> Option<Euro> {
        self.amount
    }

    pub fn purpose_code(&self) -> Option<&str> {
        self.purpose_code.as_deref()
    }

    pub fn remittance_info(&self) -> Option<&str> {
        self.remittance_info.as_deref()
    }

    pub fn structured_reference(&self) -> Option<&str> {
        self.structured_reference.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid IBAN: {0}")]
    InvalidIban(String),
    #[error("invalid BIC: {0}")]
    InvalidBic(String),
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("invalid {field}: {reason}")]
    InvalidText { field: &'static str, reason: String },
    #[error("remittance info and structured reference are mutually exclusive")]
    ConflictingReference,
    #[error("payload is {size} bytes, over the {max} byte QR capacity")]
    PayloadTooLarge { size: usize, max: usize },
}

trait ToLines {
    fn to_lines(&self) -> Vec<String>;
}
