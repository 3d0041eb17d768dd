use crate::{ToLines, ValidatedPayment, ValidationError};

use self::payload_gen::PayloadLines;

mod payload_gen;

/// Ceiling on the joined payload text. Past this the symbol needs a QR
/// version dense enough that phone cameras stop reading it reliably at the
/// error correction levels this system uses.
pub const MAX_PAYLOAD_BYTES: usize = 331;

/// The ordered, newline-delimited EPC069-12 text record. Always 11 lines;
/// absent optional fields are empty lines, never omitted ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpcPayload {
    lines: Vec<String>,
}

impl EpcPayload {
    pub fn build(payment: &ValidatedPayment) -> Result<Self, ValidationError> {
        if payment.remittance_info().is_some() && payment.structured_reference().is_some() {
            return Err(ValidationError::ConflictingReference);
        }
        let payload = Self {
            lines: PayloadLines::from(payment).to_lines(),
        };
        let size = payload.text().len();
        if size > MAX_PAYLOAD_BYTES {
            return Err(ValidationError::PayloadTooLarge {
                size,
                max: MAX_PAYLOAD_BYTES,
            });
        }
        Ok(payload)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The record joined with single newlines, no trailing newline.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use epc_qr_config::OverflowPolicy;
    use epc_qr_types::Euro;

    use crate::{PaymentRequest, ValidatedPayment, ValidationError};

    use super::{EpcPayload, MAX_PAYLOAD_BYTES};

    #[test]
    fn fixed_amount_record() {
        let req = PaymentRequest {
            beneficiary_name: "John Doe".to_string(),
            beneficiary_iban: "GB82WEST12345698765432".to_string(),
            amount: Some(25.50),
            ..Default::default()
        };
        let payload = req.to_payload(OverflowPolicy::Reject).unwrap();
        assert_eq!(
            payload.text(),
            "BCD\n002\n1\nSCT\n\nJohn Doe\nGB82WEST12345698765432\nEUR25.50\n\n\n"
        );
        assert_eq!(payload.lines().len(), 11);
    }

    #[test]
    fn variable_amount_leaves_the_amount_line_empty() {
        let req = PaymentRequest {
            beneficiary_name: "Acme Corp".to_string(),
            beneficiary_iban: "FR1420041010050500013M02606".to_string(),
            amount: Some(0.0),
            remittance_info: Some("Invoice INV-2024-001".to_string()),
            ..Default::default()
        };
        let payload = req.to_payload(OverflowPolicy::Reject).unwrap();
        let lines = payload.lines();
        assert_eq!(lines[7], "");
        assert_eq!(lines[9], "Invoice INV-2024-001");
    }

    #[test]
    fn two_fraction_digits_always() {
        let req = PaymentRequest {
            beneficiary_name: "John Doe".to_string(),
            beneficiary_iban: "BE68539007547034".to_string(),
            amount: Some(12.5),
            ..Default::default()
        };
        let payload = req.to_payload(OverflowPolicy::Reject).unwrap();
        assert_eq!(payload.lines()[7], "EUR12.50");
    }

    #[test]
    fn both_references_is_a_caller_error() {
        let req = PaymentRequest {
            beneficiary_name: "John Doe".to_string(),
            beneficiary_iban: "BE68539007547034".to_string(),
            remittance_info: Some("Invoice 2024-001".to_string()),
            structured_reference: Some("RF08539007547034".to_string()),
            ..Default::default()
        };
        assert_eq!(
            req.to_payload(OverflowPolicy::Reject).unwrap_err(),
            ValidationError::ConflictingReference
        );
    }

    #[test]
    fn oversized_payload_is_rejected() {
        // Field validation caps every line well below the payload ceiling,
        // this guards the builder against callers that bypass it.
        let payment = ValidatedPayment::new(
            "John Doe".to_string(),
            "BE68539007547034".to_string(),
            None,
            Some(Euro::new(25, 50)),
            None,
            Some("A".repeat(400)),
            None,
        );
        match EpcPayload::build(&payment).unwrap_err() {
            ValidationError::PayloadTooLarge { size, max } => {
                assert!(size > MAX_PAYLOAD_BYTES);
                assert_eq!(max, MAX_PAYLOAD_BYTES);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
