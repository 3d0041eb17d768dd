use serde::{Deserialize, Serialize};

/// Ceiling on the logo bounding box as a fraction of the image side.
/// Beyond this even level-H redundancy cannot reliably recover the payload.
pub const MAX_LOGO_SCALE: f32 = 0.25;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogoConfig {
    /// Overlay the (default or custom) logo onto generated codes.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Logo bounding box as a fraction of the image side length.
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_enabled() -> bool {
    true
}

fn default_scale() -> f32 {
    0.20
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            scale: default_scale(),
        }
    }
}
