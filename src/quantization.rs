//! Perceptual quantization: base matrices scaled by a quality factor.
//!
//! Ported from `original_source/quantization.py`, which is itself the
//! standard JPEG Annex K base luminance/chrominance matrices.
use crate::errors::EncodeErrors;

/// Base luminance quantization matrix (Annex K, `quality = 50` baseline).
#[rustfmt::skip]
pub const BASE_Q_LUMINANCE: [u8; 64] = [
    16, 11, 10, 16, 24, 40, 51, 61,
    12, 12, 14, 19, 26, 58, 60, 55,
    14, 13, 16, 24, 40, 57, 69, 56,
    14, 17, 22, 29, 51, 87, 80, 62,
    18, 22, 37, 56, 68, 109, 103, 77,
    24, 35, 55, 64, 81, 104, 113, 92,
    49, 64, 78, 87, 103, 121, 120, 101,
    72, 92, 95, 98, 112, 100, 103, 99
];

/// Base chrominance quantization matrix (Annex K, `quality = 50` baseline).
#[rustfmt::skip]
pub const BASE_Q_CHROMINANCE: [u8; 64] = [
    17, 18, 24, 47, 99, 99, 99, 99,
    18, 21, 26, 66, 99, 99, 99, 99,
    24, 26, 56, 99, 99, 99, 99, 99,
    47, 66, 99, 99, 99, 99, 99, 99,
    99, 99, 99, 99, 99, 99, 99, 99,
    99, 99, 99, 99, 99, 99, 99, 99,
    99, 99, 99, 99, 99, 99, 99, 99,
    99, 99, 99, 99, 99, 99, 99, 99
];

/// Scale a base matrix by `quality` (`1..=100`) into a per-image
/// quantization matrix: `floor((base*scale + 50) / 100)`, clamped to
/// `[1,255]`.
///
/// # Errors
/// Returns `InvalidInput` for `quality == 0` (undefined: division by
/// zero in the scale factor) or `quality > 100`.
pub fn adjust(base: &[u8; 64], quality: u8) -> Result<[u8; 64], EncodeErrors> {
    if quality == 0 || quality > 100 {
        return Err(EncodeErrors::InvalidInput(format!(
            "quality must be in [1,100], got {quality}"
        )));
    }

    let scale = if quality < 50 {
        5000.0 / f64::from(quality)
    } else {
        200.0 - 2.0 * f64::from(quality)
    };

    let mut out = [0u8; 64];
    for (o, &b) in out.iter_mut().zip(base.iter()) {
        let adjusted = ((f64::from(b) * scale + 50.0) / 100.0).floor();
        *o = adjusted.clamp(1.0, 255.0) as u8;
    }
    Ok(out)
}

/// Quantize a DCT-domain block: `round(coeff / q)` per element.
pub fn quantize(dct_block: &[f64; 64], q_matrix: &[u8; 64]) -> [i32; 64] {
    let mut out = [0i32; 64];
    for ((o, &c), &q) in out.iter_mut().zip(dct_block.iter()).zip(q_matrix.iter()) {
        *o = (c / f64::from(q)).round() as i32;
    }
    out
}

/// Dequantize: `coeff * q` per element.
pub fn dequantize(quantized: &[i32; 64], q_matrix: &[u8; 64]) -> [f64; 64] {
    let mut out = [0.0f64; 64];
    for ((o, &c), &q) in out.iter_mut().zip(quantized.iter()).zip(q_matrix.iter()) {
        *o = f64::from(c) * f64::from(q);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_50_is_identity() {
        assert_eq!(adjust(&BASE_Q_LUMINANCE, 50).unwrap(), BASE_Q_LUMINANCE);
    }

    #[test]
    fn monotone_in_quality() {
        let q1 = adjust(&BASE_Q_LUMINANCE, 10).unwrap();
        let q2 = adjust(&BASE_Q_LUMINANCE, 90).unwrap();
        for (a, b) in q1.iter().zip(q2.iter()) {
            assert!(a >= b, "{a} should be >= {b} (lower quality -> coarser matrix)");
        }
    }

    #[test]
    fn zero_quality_rejected() {
        assert!(adjust(&BASE_Q_LUMINANCE, 0).is_err());
    }

    #[test]
    fn quantize_dequantize_round_trip_within_one_step() {
        let q = adjust(&BASE_Q_LUMINANCE, 90).unwrap();
        let dct = [37.2f64; 64];
        let quantized = quantize(&dct, &q);
        let dequantized = dequantize(&quantized, &q);
        for (&d, &o) in dequantized.iter().zip(dct.iter()) {
            assert!((d - o).abs() <= f64::from(*q.iter().max().unwrap()));
        }
    }
}
