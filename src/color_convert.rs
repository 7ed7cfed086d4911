//! RGB ↔ YCbCr, ITU-R BT.601, full range.
//!
//! Coefficients and rounding from `original_source/color_conversion.py`;
//! structurally grounded on `src/color_convert/scalar.rs`'s per-pixel
//! clamp-to-u8 helper, generalized from the teacher's YCbCr-to-RGB-only
//! direction to both directions.
fn clamp_to_u8(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Convert one RGB pixel to YCbCr (BT.601, full range, offset 128 for
/// chroma).
pub fn rgb_to_ycbcr_pixel(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let (r, g, b) = (f64::from(r), f64::from(g), f64::from(b));

    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let cb = -0.168736 * r - 0.331264 * g + 0.5 * b + 128.0;
    let cr = 0.5 * r - 0.418688 * g - 0.081312 * b + 128.0;

    (clamp_to_u8(y), clamp_to_u8(cb), clamp_to_u8(cr))
}

/// Convert one YCbCr pixel back to RGB.
pub fn ycbcr_to_rgb_pixel(y: u8, cb: u8, cr: u8) -> (u8, u8, u8) {
    let y = f64::from(y);
    let cb = f64::from(cb) - 128.0;
    let cr = f64::from(cr) - 128.0;

    let r = y + 1.402 * cr;
    let g = y - 0.344136 * cb - 0.714136 * cr;
    let b = y + 1.772 * cb;

    (clamp_to_u8(r), clamp_to_u8(g), clamp_to_u8(b))
}

/// Convert a packed H×W×3 RGB buffer to packed H×W×3 YCbCr.
pub fn rgb_to_ycbcr(rgb: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; rgb.len()];
    for (src, dst) in rgb.chunks_exact(3).zip(out.chunks_exact_mut(3)) {
        let (y, cb, cr) = rgb_to_ycbcr_pixel(src[0], src[1], src[2]);
        dst[0] = y;
        dst[1] = cb;
        dst[2] = cr;
    }
    out
}

/// Convert a packed H×W×3 YCbCr buffer to packed H×W×3 RGB.
pub fn ycbcr_to_rgb(ycbcr: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; ycbcr.len()];
    for (src, dst) in ycbcr.chunks_exact(3).zip(out.chunks_exact_mut(3)) {
        let (r, g, b) = ycbcr_to_rgb_pixel(src[0], src[1], src[2]);
        dst[0] = r;
        dst[1] = g;
        dst[2] = b;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_identity_round_trip() {
        for r in (0..=255u16).step_by(17) {
            for g in (0..=255u16).step_by(23) {
                for b in (0..=255u16).step_by(29) {
                    let (r, g, b) = (r as u8, g as u8, b as u8);
                    let (y, cb, cr) = rgb_to_ycbcr_pixel(r, g, b);
                    let (r2, g2, b2) = ycbcr_to_rgb_pixel(y, cb, cr);
                    assert!((i16::from(r) - i16::from(r2)).abs() <= 2);
                    assert!((i16::from(g) - i16::from(g2)).abs() <= 2);
                    assert!((i16::from(b) - i16::from(b2)).abs() <= 2);
                }
            }
        }
    }

    #[test]
    fn gray_maps_to_zero_chroma_offset() {
        let (y, cb, cr) = rgb_to_ycbcr_pixel(128, 128, 128);
        assert_eq!(y, 128);
        assert_eq!(cb, 128);
        assert_eq!(cr, 128);
    }

    #[test]
    fn buffer_level_round_trip() {
        let rgb: Vec<u8> = (0..12).map(|i| (i * 20) as u8).collect();
        let ycbcr = rgb_to_ycbcr(&rgb);
        let restored = ycbcr_to_rgb(&ycbcr);
        for (&a, &b) in rgb.iter().zip(restored.iter()) {
            assert!((i16::from(a) - i16::from(b)).abs() <= 2);
        }
    }
}
