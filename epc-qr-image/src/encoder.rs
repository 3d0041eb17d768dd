use epc_qr_types::ErrorCorrection;
use image::{Rgba, RgbaImage};
use qrcode::{EcLevel, QrCode};

fn ec_level(level: ErrorCorrection) -> EcLevel {
    match level {
        ErrorCorrection::Low => EcLevel::L,
        ErrorCorrection::Medium => EcLevel::M,
        ErrorCorrection::Quartile => EcLevel::Q,
        ErrorCorrection::High => EcLevel::H,
    }
}

/// Encode text into a QR module matrix at the requested level. The symbol
/// version is auto-selected by the library.
pub(crate) fn encode(text: &str, level: ErrorCorrection) -> Result<QrCode, qrcode::types::QrError> {
    QrCode::with_error_correction_level(text, ec_level(level))
}

/// Paint dark modules onto a white canvas, `module_pixels` pixels per module
/// with a `border_modules` quiet zone, so overlays can be aligned to the
/// module grid.
pub(crate) fn rasterize(code: &QrCode, module_pixels: u32, border_modules: u32) -> RgbaImage {
    let width = code.width() as u32;
    let side = (width + 2 * border_modules) * module_pixels;
    let mut img = RgbaImage::from_pixel(side, side, Rgba([255, 255, 255, 255]));
    for y in 0..code.width() {
        for x in 0..code.width() {
            if code[(x, y)] != qrcode::Color::Dark {
                continue;
            }
            for dy in 0..module_pixels {
                for dx in 0..module_pixels {
                    let px = (border_modules + x as u32) * module_pixels + dx;
                    let py = (border_modules + y as u32) * module_pixels + dy;
                    img.put_pixel(px, py, Rgba([0, 0, 0, 255]));
                }
            }
        }
    }
    img
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_mapping_is_one_to_one() {
        assert_eq!(ec_level(ErrorCorrection::Low), EcLevel::L);
        assert_eq!(ec_level(ErrorCorrection::Medium), EcLevel::M);
        assert_eq!(ec_level(ErrorCorrection::Quartile), EcLevel::Q);
        assert_eq!(ec_level(ErrorCorrection::High), EcLevel::H);
    }

    #[test]
    fn encoding_is_deterministic() {
        let a = encode("BCD\n002\n1\nSCT", ErrorCorrection::Medium).unwrap();
        let b = encode("BCD\n002\n1\nSCT", ErrorCorrection::Medium).unwrap();
        assert_eq!(a.width(), b.width());
        assert_eq!(a.to_colors(), b.to_colors());
    }

    #[test]
    fn rasterized_size_includes_the_quiet_zone() {
        let code = encode("hello", ErrorCorrection::Medium).unwrap();
        let img = rasterize(&code, 10, 4);
        let expected = (code.width() as u32 + 8) * 10;
        assert_eq!(img.dimensions(), (expected, expected));
        // top-left module of the finder pattern is dark
        assert_eq!(img.get_pixel(40, 40).0, [0, 0, 0, 255]);
        // quiet zone is white
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }
}
