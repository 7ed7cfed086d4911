//! 8×8 zig-zag scan order.
//!
//! The traversal order is a fixed permutation of the 64 cell indices, so
//! both directions are plain table lookups — the teacher precomputes the
//! inverse table as `UN_ZIGZAG` in `misc.rs`; this module precomputes both
//! tables once via [`std::sync::OnceLock`] from the same wall-reflection
//! walk `original_source/zigzag.py` implements, rather than hand-copying
//! 64 literals twice.

const N: usize = 8;

fn build_zigzag_order() -> [usize; 64] {
    let mut order = [0usize; 64];
    let (mut row, mut col) = (0usize, 0usize);
    let mut up = true;

    for slot in order.iter_mut() {
        *slot = row * N + col;

        if up {
            if col == N - 1 {
                row += 1;
                up = false;
            } else if row == 0 {
                col += 1;
                up = false;
            } else {
                row -= 1;
                col += 1;
            }
        } else if row == N - 1 {
            col += 1;
            up = true;
        } else if col == 0 {
            row += 1;
            up = true;
        } else {
            row += 1;
            col -= 1;
        }
    }

    order
}

/// `ZIGZAG[k]` is the row-major index of the matrix cell visited at scan
/// position `k`.
pub static ZIGZAG: std::sync::LazyLock<[usize; 64]> = std::sync::LazyLock::new(build_zigzag_order);

/// `UN_ZIGZAG[i]` is the scan position of row-major matrix cell `i` — the
/// inverse permutation of [`ZIGZAG`].
pub static UN_ZIGZAG: std::sync::LazyLock<[usize; 64]> = std::sync::LazyLock::new(|| {
    let mut inverse = [0usize; 64];
    for (k, &cell) in ZIGZAG.iter().enumerate() {
        inverse[cell] = k;
    }
    inverse
});

/// Linearize an 8×8 row-major matrix into zig-zag scan order.
pub fn zigzag(matrix: &[i32; 64]) -> [i32; 64] {
    let mut out = [0i32; 64];
    for (k, &cell) in ZIGZAG.iter().enumerate() {
        out[k] = matrix[cell];
    }
    out
}

/// Undo [`zigzag`]: place a 64-element scan-order sequence back into an
/// 8×8 row-major matrix.
pub fn inverse_zigzag(scan: &[i32; 64]) -> [i32; 64] {
    let mut out = [0i32; 64];
    for (k, &cell) in ZIGZAG.iter().enumerate() {
        out[cell] = scan[k];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_matches_spec_scenario_d() {
        let mut matrix = [0i32; 64];
        for (i, slot) in matrix.iter_mut().enumerate() {
            *slot = i as i32;
        }
        let scanned = zigzag(&matrix);
        assert_eq!(&scanned[0..7], &[0, 1, 8, 16, 9, 2, 3]);
    }

    #[test]
    fn is_an_involution() {
        let mut matrix = [0i32; 64];
        for (i, slot) in matrix.iter_mut().enumerate() {
            *slot = (i as i32) * 3 - 17;
        }
        assert_eq!(inverse_zigzag(&zigzag(&matrix)), matrix);
    }

    #[test]
    fn visits_every_cell_exactly_once() {
        let mut seen = [false; 64];
        for &cell in ZIGZAG.iter() {
            assert!(!seen[cell], "cell {cell} visited twice");
            seen[cell] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
