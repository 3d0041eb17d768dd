use crate::{ToLines, ValidatedPayment};

/// Service tag, format version, character set indicator (1 = UTF-8) and
/// identification code, fixed for every SEPA Credit Transfer payload.
const HEADER_LINES: [&str; 4] = ["BCD", "002", "1", "SCT"];

/// String form of every variable field in record order, empty where absent.
pub(crate) struct PayloadLines {
    bic: String,
    beneficiary_name: String,
    beneficiary_iban: String,
    amount: String,
    purpose_code: String,
    remittance_info: String,
    structured_reference: String,
}

impl ToLines for PayloadLines {
    fn to_lines(&self) -> Vec<String> {
        let mut v: Vec<String> = HEADER_LINES.iter().map(|s| s.to_string()).collect();
        v.push(self.bic.clone());
        v.push(self.beneficiary_name.clone());
        v.push(self.beneficiary_iban.clone());
        v.push(self.amount.clone());
        v.push(self.purpose_code.clone());
        v.push(self.remittance_info.clone());
        v.push(self.structured_reference.clone());
        v
    }
}

impl From<&ValidatedPayment> for PayloadLines {
    fn from(value: &ValidatedPayment) -> Self {
        Self {
            bic: value.bic().unwrap_or_default().to_string(),
            beneficiary_name: value.beneficiary_name().to_string(),
            beneficiary_iban: value.beneficiary_iban().to_string(),
            amount: value
                .amount()
                .map(|amount| format!("EUR{}", amount.payload_string()))
                .unwrap_or_default(),
            purpose_code: value.purpose_code().unwrap_or_default().to_string(),
            remittance_info: value.remittance_info().unwrap_or_default().to_string(),
            structured_reference: value.structured_reference().unwrap_or_default().to_string(),
        }
    }
}
