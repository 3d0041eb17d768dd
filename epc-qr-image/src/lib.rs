use epc_qr_config::Config;
use epc_qr_payload::{EpcPayload, PaymentRequest, ValidationError};
use epc_qr_types::ErrorCorrection;
use image::RgbaImage;

mod encoder;
mod logo;

/// Logo overlay selection for a render.
#[derive(Debug, Clone)]
pub enum Logo {
    /// The embedded Euro glyph.
    Default,
    /// Caller-supplied raster bytes, any format the image decoder accepts.
    /// Non-square images are center-cropped before placement.
    Custom(Vec<u8>),
}

/// Everything a single render needs besides the payload itself.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Pixels per QR module.
    pub module_pixels: u32,
    /// Quiet zone width in modules.
    pub border_modules: u32,
    /// Requested level; a logo overlay overrides this with High.
    pub error_correction: ErrorCorrection,
    pub logo: Option<Logo>,
    /// Logo bounding box as a fraction of the image side length.
    pub logo_scale: f32,
}

impl RenderOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            module_pixels: config.render().module_pixels,
            border_modules: config.render().border_modules,
            error_correction: config.render().error_correction,
            logo: config.logo().enabled.then_some(Logo::Default),
            logo_scale: config.logo().scale,
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// User input problem, reported per field.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("logo box at {requested} of the side exceeds the {ceiling} ceiling")]
    LogoTooLarge { requested: f32, ceiling: f32 },
    /// Internal failure of the QR symbol encoder, not a user input error.
    #[error("QR encoding failed: {0}")]
    Encoding(#[from] qrcode::types::QrError),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Validate a payment request, build its EPC069-12 payload and render the
/// QR image. The one-stop entry point.
pub fn generate_payment_qr(
    request: &PaymentRequest,
    config: &Config,
) -> Result<Vec<u8>, RenderError> {
    let payload = request.to_payload(config.validation().text_overflow)?;
    render_png(&payload, &RenderOptions::from_config(config))
}

/// Render an already-built payload to PNG bytes.
pub fn render_png(payload: &EpcPayload, options: &RenderOptions) -> Result<Vec<u8>, RenderError> {
    let level = logo::effective_level(options.error_correction, options.logo.is_some());
    let code = encoder::encode(&payload.text(), level)?;
    let mut img = encoder::rasterize(&code, options.module_pixels, options.border_modules);
    if let Some(logo) = &options.logo {
        logo::composite(&mut img, logo, options.logo_scale, options.module_pixels)?;
    }
    encode_png(&img)
}

fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    use image::{codecs::png::PngEncoder, ExtendedColorType, ImageEncoder};

    let mut bytes = Vec::new();
    let encoder = PngEncoder::new(&mut bytes);
    encoder.write_image(
        img.as_raw(),
        img.width(),
        img.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(bytes)
}
