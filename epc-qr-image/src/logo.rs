use epc_qr_config::MAX_LOGO_SCALE;
use epc_qr_types::ErrorCorrection;
use image::{imageops, Rgba, RgbaImage};
use once_cell::sync::Lazy;

use crate::{Logo, RenderError};

const DEFAULT_LOGO_PNG: &[u8] = include_bytes!("../assets/euro-logo.png");

static DEFAULT_LOGO: Lazy<RgbaImage> = Lazy::new(|| {
    image::load_from_memory(DEFAULT_LOGO_PNG)
        .expect("embedded logo decodes")
        .to_rgba8()
});

/// A logo occludes the symbol center; only level H carries enough
/// redundancy to survive that, so a logo always wins over the requested
/// level.
pub(crate) fn effective_level(requested: ErrorCorrection, has_logo: bool) -> ErrorCorrection {
    if has_logo {
        ErrorCorrection::High
    } else {
        requested
    }
}

/// Overlay the logo centered on the rendered symbol.
///
/// The logo box is rounded to a whole number of modules with its parity
/// matched to the symbol's, so the centered box sits on module boundaries
/// instead of cutting modules in half. The box is painted white before the
/// logo is alpha-blended onto it.
pub(crate) fn composite(
    qr: &mut RgbaImage,
    logo: &Logo,
    scale: f32,
    module_pixels: u32,
) -> Result<(), RenderError> {
    if scale > MAX_LOGO_SCALE {
        return Err(RenderError::LogoTooLarge {
            requested: scale,
            ceiling: MAX_LOGO_SCALE,
        });
    }
    let source = match logo {
        Logo::Default => DEFAULT_LOGO.clone(),
        Logo::Custom(bytes) => center_square(image::load_from_memory(bytes)?.to_rgba8()),
    };

    let total_modules = qr.width() / module_pixels;
    let mut box_modules = ((scale * total_modules as f32).round() as u32).max(1);
    if (total_modules - box_modules) % 2 != 0 {
        box_modules += 1;
    }
    let box_px = box_modules * module_pixels;
    let offset = (total_modules - box_modules) / 2 * module_pixels;

    let resized = imageops::resize(&source, box_px, box_px, imageops::FilterType::Lanczos3);

    for y in 0..box_px {
        for x in 0..box_px {
            qr.put_pixel(offset + x, offset + y, Rgba([255, 255, 255, 255]));
        }
    }
    overlay_alpha(qr, &resized, offset, offset);
    Ok(())
}

/// Center-crop a non-square image to a square so placement cannot distort it.
fn center_square(mut img: RgbaImage) -> RgbaImage {
    if img.width() == img.height() {
        return img;
    }
    let min_dim = img.width().min(img.height());
    let left = (img.width() - min_dim) / 2;
    let top = (img.height() - min_dim) / 2;
    imageops::crop(&mut img, left, top, min_dim, min_dim).to_image()
}

fn overlay_alpha(base: &mut RgbaImage, over: &RgbaImage, x: u32, y: u32) {
    for oy in 0..over.height() {
        for ox in 0..over.width() {
            let p = over.get_pixel(ox, oy);
            let a = p.0[3] as f32 / 255.0;
            if a <= 0.0 {
                continue;
            }
            let bx = x + ox;
            let by = y + oy;
            if bx >= base.width() || by >= base.height() {
                continue;
            }
            let dst = base.get_pixel_mut(bx, by);
            let inv = 1.0 - a;
            dst.0[0] = (p.0[0] as f32 * a + dst.0[0] as f32 * inv) as u8;
            dst.0[1] = (p.0[1] as f32 * a + dst.0[1] as f32 * inv) as u8;
            dst.0[2] = (p.0[2] as f32 * a + dst.0[2] as f32 * inv) as u8;
            dst.0[3] = 255;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logo_always_forces_level_h() {
        for requested in [
            ErrorCorrection::Low,
            ErrorCorrection::Medium,
            ErrorCorrection::Quartile,
            ErrorCorrection::High,
        ] {
            assert_eq!(effective_level(requested, true), ErrorCorrection::High);
        }
        assert_eq!(
            effective_level(ErrorCorrection::Medium, false),
            ErrorCorrection::Medium
        );
    }

    #[test]
    fn oversized_logo_is_rejected_not_shrunk() {
        let mut qr = RgbaImage::from_pixel(570, 570, Rgba([0, 0, 0, 255]));
        let err = composite(&mut qr, &Logo::Default, 0.4, 10).unwrap_err();
        match err {
            RenderError::LogoTooLarge { requested, ceiling } => {
                assert_eq!(requested, 0.4);
                assert_eq!(ceiling, MAX_LOGO_SCALE);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // nothing was composited
        assert_eq!(qr.get_pixel(285, 285).0, [0, 0, 0, 255]);
    }

    #[test]
    fn logo_box_is_module_aligned_and_centered() {
        // 57 modules at 10 px each; 0.2 * 57 rounds to 11 modules wide,
        // leaving a symmetric 23-module margin.
        let mut qr = RgbaImage::from_pixel(570, 570, Rgba([0, 0, 0, 255]));
        composite(&mut qr, &Logo::Default, 0.2, 10).unwrap();
        assert_eq!(qr.get_pixel(229, 285).0, [0, 0, 0, 255]);
        assert_eq!(qr.get_pixel(230, 285).0[3], 255);
        assert_ne!(qr.get_pixel(230, 285).0, [0, 0, 0, 255]);
        assert_ne!(qr.get_pixel(339, 285).0, [0, 0, 0, 255]);
        assert_eq!(qr.get_pixel(340, 285).0, [0, 0, 0, 255]);
    }

    #[test]
    fn parity_mismatch_grows_the_box_to_stay_on_the_grid() {
        // 0.21 * 57 rounds to 12 modules, parity bump makes it 13 so the
        // margin stays whole: (57 - 13) / 2 = 22 modules.
        let mut qr = RgbaImage::from_pixel(570, 570, Rgba([0, 0, 0, 255]));
        composite(&mut qr, &Logo::Default, 0.21, 10).unwrap();
        assert_eq!(qr.get_pixel(219, 285).0, [0, 0, 0, 255]);
        assert_ne!(qr.get_pixel(220, 285).0, [0, 0, 0, 255]);
        assert_ne!(qr.get_pixel(349, 285).0, [0, 0, 0, 255]);
        assert_eq!(qr.get_pixel(350, 285).0, [0, 0, 0, 255]);
    }

    #[test]
    fn embedded_default_logo_decodes_square() {
        assert_eq!(DEFAULT_LOGO.width(), DEFAULT_LOGO.height());
        assert!(DEFAULT_LOGO.width() > 0);
    }

    #[test]
    fn custom_logos_are_center_cropped_to_square() {
        let wide = RgbaImage::from_pixel(40, 20, Rgba([10, 20, 30, 255]));
        let squared = center_square(wide);
        assert_eq!(squared.dimensions(), (20, 20));
    }
}
