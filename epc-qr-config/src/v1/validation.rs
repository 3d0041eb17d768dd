use serde::{Deserialize, Serialize};

/// What to do with text fields longer than their EPC limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Fail validation so callers never silently lose remittance detail.
    #[default]
    Reject,
    /// Cut the text down to the field limit.
    Truncate,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ValidationConfig {
    #[serde(default)]
    pub text_overflow: OverflowPolicy,
}
