/// ISO 20022 purpose codes with display names. The code set is open ended,
/// so unknown four-letter codes are still accepted by validation; this table
/// only serves display lookups.
pub const PURPOSE_CODES: &[(&str, &str)] = &[
    ("CBFF", "Capital building"),
    ("CHAR", "Charity payment"),
    ("COMC", "Commercial payment"),
    ("CPKC", "Car park charges"),
    ("DIVI", "Dividend"),
    ("GOVI", "Government insurance"),
    ("GSCI", "Government social contribution"),
    ("INST", "Insurance premium"),
    ("INTC", "Interest"),
    ("LIMA", "Liquidity management"),
    ("OTHR", "Other"),
    ("RLTI", "Real estate investment"),
    ("SALA", "Salary"),
    ("SECU", "Securities"),
    ("SSBE", "Social security benefit"),
    ("SUPP", "Supplier payment"),
    ("TAXS", "Tax payment"),
    ("TRAD", "Trade"),
    ("TREA", "Treasury payment"),
    ("VATX", "VAT payment"),
    ("WHLD", "Withholding"),
];

pub fn describe_purpose(code: &str) -> Option<&'static str> {
    PURPOSE_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, description)| *description)
}
