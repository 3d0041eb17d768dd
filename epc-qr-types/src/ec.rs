use serde::{Deserialize, Serialize};

/// QR error correction level, trading data capacity for resilience to
/// damage or occlusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCorrection {
    Low,
    #[default]
    Medium,
    Quartile,
    High,
}
