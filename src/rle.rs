//! AC coefficient run-length coding.
//!
//! Ported from `original_source/rle.py`: walks the 63 AC coefficients in
//! scan order, accumulating a zero run that flushes to `ZRL` every 16
//! zeros, and always terminates with `EOB`.

/// A single RLE pair: `run` leading zeros followed by `value`.
///
/// The two reserved symbols are represented directly rather than as a
/// separate enum variant, matching `original_source/rle.py`'s tuple
/// encoding: `ZRL = RlePair { run: 15, value: 0 }`, `EOB = RlePair { run: 0,
/// value: 0 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RlePair {
    pub run:   u8,
    pub value: i32
}

impl RlePair {
    pub const ZRL: RlePair = RlePair { run: 15, value: 0 };
    pub const EOB: RlePair = RlePair { run: 0, value: 0 };

    pub const fn is_eob(self) -> bool {
        self.run == 0 && self.value == 0
    }

    pub const fn is_zrl(self) -> bool {
        self.run == 15 && self.value == 0
    }
}

/// Encode the 63 AC coefficients (scan order, DC already removed) into
/// `(run, value)` pairs, terminated unconditionally with `EOB`.
pub fn encode(ac_coeffs: &[i32]) -> Vec<RlePair> {
    let mut pairs = Vec::new();
    let mut zero_run: u8 = 0;

    for &coeff in ac_coeffs {
        if coeff == 0 {
            zero_run += 1;
            if zero_run == 16 {
                pairs.push(RlePair::ZRL);
                zero_run = 0;
            }
        } else {
            pairs.push(RlePair { run: zero_run, value: coeff });
            zero_run = 0;
        }
    }

    pairs.push(RlePair::EOB);
    pairs
}

/// Decode `(run, value)` pairs back into exactly `num_ac_coeffs`
/// coefficients.
///
/// `EOB` pads the remainder with zeros and stops. `ZRL` appends 16 zeros.
/// Any other pair appends `run` zeros then `value`. If the reconstruction
/// would exceed `num_ac_coeffs` it is truncated; if the pair list runs out
/// before an `EOB`, the remainder is zero-padded.
pub fn decode(pairs: &[RlePair], num_ac_coeffs: usize) -> Vec<i32> {
    let mut coeffs = Vec::with_capacity(num_ac_coeffs);

    for &pair in pairs {
        if pair.is_eob() {
            coeffs.resize(num_ac_coeffs, 0);
            break;
        } else if pair.is_zrl() {
            coeffs.extend(std::iter::repeat(0).take(16));
        } else {
            coeffs.extend(std::iter::repeat(0).take(pair.run as usize));
            coeffs.push(pair.value);
        }

        if coeffs.len() >= num_ac_coeffs {
            coeffs.truncate(num_ac_coeffs);
            break;
        }
    }

    coeffs.resize(num_ac_coeffs, 0);
    coeffs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_zero_block_is_just_eob() {
        let input = [0i32; 63];
        let pairs = encode(&input);
        assert_eq!(pairs, vec![RlePair::EOB]);
        assert_eq!(decode(&pairs, 63), input);
    }

    #[test]
    fn zrl_then_value_then_eob() {
        let mut input = vec![0i32; 17];
        input.push(3);
        input.resize(63, 0);

        let pairs = encode(&input);
        assert_eq!(
            pairs,
            vec![RlePair::ZRL, RlePair { run: 1, value: 3 }, RlePair::EOB]
        );
        assert_eq!(decode(&pairs, 63), input);
    }

    #[test]
    fn round_trip_arbitrary_sequence() {
        let input: Vec<i32> = (0..63)
            .map(|i| if i % 7 == 0 { (i * 3 - 30) as i32 } else { 0 })
            .collect();
        let pairs = encode(&input);
        assert_eq!(decode(&pairs, 63), input);
    }

    #[test]
    fn sixteen_leading_zeros_without_overflow() {
        let mut input = vec![0i32; 16];
        input.push(7);
        input.resize(63, 0);
        let pairs = encode(&input);
        // exactly 16 zeros -> one ZRL, not folded into the next run
        assert_eq!(pairs[0], RlePair::ZRL);
        assert_eq!(decode(&pairs, 63), input);
    }
}
