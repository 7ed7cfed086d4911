//! Variable-length integer (VLI) sign-magnitude coding.
//!
//! Ported from `original_source/vli_coding.py`: a signed value is stored as
//! a bit-length `category` plus a `category`-bit payload, one's-complement
//! for negatives. Per spec.md §9, bits are carried as a typed
//! `(value, length)` pair rather than a decimal bitstring.

use crate::errors::{DecodeErrors, EncodeErrors};

/// Maximum VLI category: JPEG bounds categories to `[0,15]`.
pub const MAX_CATEGORY: u8 = 15;

/// Encode a signed coefficient as `(category, (bits, length))`.
///
/// `category` is the bit-length of `|n|`; `bits` holds that many bits,
/// magnitude for positive `n`, one's-complement of the magnitude for
/// negative `n`. Zero encodes to category 0 with an empty payload.
///
/// # Errors
/// Returns `NumericRange` if `|n|` would need a category above
/// [`MAX_CATEGORY`].
pub fn encode(n: i32) -> Result<(u8, (u16, u8)), EncodeErrors> {
    if n == 0 {
        return Ok((0, (0, 0)));
    }

    let magnitude = n.unsigned_abs();
    let category = (32 - magnitude.leading_zeros()) as u8;

    if category > MAX_CATEGORY {
        return Err(EncodeErrors::NumericRange(format!(
            "VLI category {category} for value {n} exceeds {MAX_CATEGORY}"
        )));
    }

    let bits = if n > 0 {
        magnitude as u16
    } else {
        ((1u32 << category) - 1 - magnitude) as u16
    };

    Ok((category, (bits, category)))
}

/// Decode `(category, bits)` back into a signed value.
///
/// # Errors
/// Returns `NumericRange` if `category` is outside `[0,15]`.
pub fn decode(category: u8, bits: u16) -> Result<i32, DecodeErrors> {
    if category == 0 {
        return Ok(0);
    }
    if category > MAX_CATEGORY {
        return Err(DecodeErrors::NumericRange(format!(
            "VLI category {category} exceeds {MAX_CATEGORY}"
        )));
    }

    let value = i32::from(bits);
    let sign_threshold = 1i32 << (category - 1);

    if value >= sign_threshold {
        Ok(value)
    } else {
        Ok(value - ((1i32 << category) - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_encodes_to_empty_category() {
        assert_eq!(encode(0).unwrap(), (0, (0, 0)));
    }

    #[test]
    fn concrete_cases_match_spec() {
        assert_eq!(encode(1).unwrap(), (1, (0b1, 1)));
        assert_eq!(encode(-1).unwrap(), (1, (0b0, 1)));
        assert_eq!(encode(5).unwrap(), (3, (0b101, 3)));
        assert_eq!(encode(-5).unwrap(), (3, (0b010, 3)));
    }

    #[test]
    fn round_trip_small_range() {
        for n in -(1 << 14)..(1 << 14) {
            let (category, (bits, _)) = encode(n).unwrap();
            assert_eq!(decode(category, bits).unwrap(), n, "n={n}");
        }
    }

    #[test]
    fn round_trip_boundary_magnitudes() {
        for shift in 0..15u32 {
            for n in [1i32 << shift, -(1i32 << shift)] {
                if n.unsigned_abs() >= 1 << 15 {
                    continue;
                }
                let (category, (bits, _)) = encode(n).unwrap();
                assert_eq!(decode(category, bits).unwrap(), n);
            }
        }
    }

    #[test]
    fn category_zero_decodes_to_zero() {
        assert_eq!(decode(0, 0xFFFF).unwrap(), 0);
    }

    #[test]
    fn out_of_range_category_rejected() {
        assert!(decode(16, 0).is_err());
    }
}
