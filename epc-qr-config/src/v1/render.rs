use epc_qr_types::ErrorCorrection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RenderConfig {
    /// Pixels per QR module.
    #[serde(default = "default_module_pixels")]
    pub module_pixels: u32,
    /// Quiet zone width in modules.
    #[serde(default = "default_border_modules")]
    pub border_modules: u32,
    /// Level used when no logo overlay forces a stronger one.
    #[serde(default)]
    pub error_correction: ErrorCorrection,
}

fn default_module_pixels() -> u32 {
    10
}

fn default_border_modules() -> u32 {
    4
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            module_pixels: default_module_pixels(),
            border_modules: default_border_modules(),
            error_correction: ErrorCorrection::default(),
        }
    }
}
