//! Forward and inverse 8×8 type-II DCT.
//!
//! This is the direct, orthonormal formulation from
//! `original_source/dct.py`: `F = ¼ · (C⊗C) ⊙ (T·X·Tᵀ)` and its inverse,
//! built from the `T[k,n] = cos((2n+1)kπ/(2N))` basis. The teacher's
//! `idct.rs`/`idct/scalar.rs` instead carries an integer fast IDCT tuned
//! for decode speed; this crate needs the same numeric contract for both
//! directions (property 6 in spec.md §8 requires round-trip error under
//! `1e-9`), so it keeps the straightforward separable matrix form rather
//! than porting a speed-optimized one-directional kernel.
use std::sync::LazyLock;

const N: usize = 8;

fn c_factor(k: usize) -> f64 {
    if k == 0 {
        1.0 / std::f64::consts::SQRT_2
    } else {
        1.0
    }
}

fn build_basis() -> [[f64; N]; N] {
    let mut t = [[0.0f64; N]; N];
    for (k, row) in t.iter_mut().enumerate() {
        for (n, cell) in row.iter_mut().enumerate() {
            *cell = (((2 * n + 1) * k) as f64 * std::f64::consts::PI / (2.0 * N as f64)).cos();
        }
    }
    t
}

static BASIS: LazyLock<[[f64; N]; N]> = LazyLock::new(build_basis);

fn matmul(a: &[[f64; N]; N], b: &[[f64; N]; N]) -> [[f64; N]; N] {
    let mut out = [[0.0f64; N]; N];
    for i in 0..N {
        for j in 0..N {
            let mut sum = 0.0;
            for k in 0..N {
                sum += a[i][k] * b[k][j];
            }
            out[i][j] = sum;
        }
    }
    out
}

fn transpose(a: &[[f64; N]; N]) -> [[f64; N]; N] {
    let mut out = [[0.0f64; N]; N];
    for i in 0..N {
        for j in 0..N {
            out[j][i] = a[i][j];
        }
    }
    out
}

fn to_matrix(block: &[f64; 64]) -> [[f64; N]; N] {
    let mut m = [[0.0f64; N]; N];
    for r in 0..N {
        for c in 0..N {
            m[r][c] = block[r * N + c];
        }
    }
    m
}

fn from_matrix(m: &[[f64; N]; N]) -> [f64; 64] {
    let mut block = [0.0f64; 64];
    for r in 0..N {
        for c in 0..N {
            block[r * N + c] = m[r][c];
        }
    }
    block
}

/// Forward 2-D DCT of an already-centered (zero-mean) 8×8 block.
///
/// Centering (subtracting 128) is the caller's job — see
/// [`crate::block::center_block`] — so this function works identically
/// whether the samples came from `u8` pixels or are already float.
pub fn forward_dct(block: &[f64; 64]) -> [f64; 64] {
    let x = to_matrix(block);
    let basis = &*BASIS;
    let basis_t = transpose(basis);
    let intermediate = matmul(&matmul(basis, &x), &basis_t);

    let mut coeffs = [[0.0f64; N]; N];
    for k1 in 0..N {
        for k2 in 0..N {
            coeffs[k1][k2] = 0.25 * c_factor(k1) * c_factor(k2) * intermediate[k1][k2];
        }
    }
    from_matrix(&coeffs)
}

/// Inverse 2-D DCT: `X = ¼ · Tᵀ · ((C⊗C) ⊙ F) · T`.
pub fn inverse_dct(coeffs: &[f64; 64]) -> [f64; 64] {
    let f = to_matrix(coeffs);
    let basis = &*BASIS;
    let basis_t = transpose(basis);

    let mut scaled = [[0.0f64; N]; N];
    for k1 in 0..N {
        for k2 in 0..N {
            scaled[k1][k2] = c_factor(k1) * c_factor(k2) * f[k1][k2];
        }
    }

    let intermediate = matmul(&matmul(&basis_t, &scaled), basis);
    let mut block = [[0.0f64; N]; N];
    for r in 0..N {
        for c in 0..N {
            block[r][c] = 0.25 * intermediate[r][c];
        }
    }
    from_matrix(&block)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_within_tolerance() {
        let mut block = [0.0f64; 64];
        for (i, slot) in block.iter_mut().enumerate() {
            *slot = ((i * 7 % 23) as f64) - 11.0;
        }
        let restored = inverse_dct(&forward_dct(&block));
        for (a, b) in block.iter().zip(restored.iter()) {
            assert!((a - b).abs() < 1e-9, "{a} vs {b}");
        }
    }

    #[test]
    fn constant_block_has_single_dc_coefficient() {
        let block = [64.0f64; 64];
        let coeffs = forward_dct(&block);
        assert!(coeffs[0].abs() > 1.0);
        for &c in &coeffs[1..] {
            assert!(c.abs() < 1e-9);
        }
    }

    #[test]
    fn zero_block_round_trips_to_zero() {
        let block = [0.0f64; 64];
        let restored = inverse_dct(&forward_dct(&block));
        assert_eq!(restored, [0.0f64; 64]);
    }
}
