//! 8×8 block decomposition, padding, and 4:2:0 chroma resampling.
//!
//! Padding/tiling/reassembly port `original_source/block_processing.py`;
//! subsampling/upsampling port the `downsample_channel_420`/
//! `upsample_channel_nearest_neighbor` helpers from `original_source/
//! compressor.py`/`decompressor.py`.

/// Fill value used for padded regions, regardless of channel. Spec.md §9
/// notes this matches neutral gray for luma but is an arbitrary (if
/// harmless) choice for chroma; kept as a documented constant rather than
/// derived per-channel.
pub const PAD_FILL: u8 = 128;

pub const BLOCK_SIZE: usize = 8;

/// A single 8-bit channel plane, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane {
    pub data:   Vec<u8>,
    pub height: usize,
    pub width:  usize
}

impl Plane {
    pub fn new(data: Vec<u8>, height: usize, width: usize) -> Plane {
        debug_assert_eq!(data.len(), height * width);
        Plane { data, height, width }
    }

    fn get(&self, row: usize, col: usize) -> u8 {
        self.data[row * self.width + col]
    }
}

/// Round up to the next multiple of [`BLOCK_SIZE`].
fn padded_dim(n: usize) -> usize {
    n.div_ceil(BLOCK_SIZE) * BLOCK_SIZE
}

/// Pad a plane on the right and bottom to a multiple of 8 with
/// [`PAD_FILL`]. Returns the padded plane.
pub fn pad(plane: &Plane) -> Plane {
    let padded_h = padded_dim(plane.height);
    let padded_w = padded_dim(plane.width);

    let mut data = vec![PAD_FILL; padded_h * padded_w];
    for row in 0..plane.height {
        let src_start = row * plane.width;
        let dst_start = row * padded_w;
        data[dst_start..dst_start + plane.width]
            .copy_from_slice(&plane.data[src_start..src_start + plane.width]);
    }

    Plane::new(data, padded_h, padded_w)
}

/// Split a padded plane (dimensions already multiples of 8) into row-major
/// 8×8 blocks, each a 64-element row-major array of centered `f64` samples
/// (`pixel - 128`).
pub fn tile(padded: &Plane) -> Vec<[f64; 64]> {
    debug_assert_eq!(padded.height % BLOCK_SIZE, 0);
    debug_assert_eq!(padded.width % BLOCK_SIZE, 0);

    let blocks_per_row = padded.width / BLOCK_SIZE;
    let blocks_per_col = padded.height / BLOCK_SIZE;
    let mut blocks = Vec::with_capacity(blocks_per_row * blocks_per_col);

    for block_row in 0..blocks_per_col {
        for block_col in 0..blocks_per_row {
            let mut block = [0.0f64; 64];
            for r in 0..BLOCK_SIZE {
                for c in 0..BLOCK_SIZE {
                    let sample = padded.get(block_row * BLOCK_SIZE + r, block_col * BLOCK_SIZE + c);
                    block[r * BLOCK_SIZE + c] = f64::from(sample) - 128.0;
                }
            }
            blocks.push(block);
        }
    }
    blocks
}

/// Reassemble 8×8 `u8` blocks (decoder-side, already inverse-DCT'd and
/// shifted back to `[0,255]`) into a `padded_h × padded_w` plane, in the
/// same row-major-over-block-rows, column-major-within-a-row order
/// [`tile`] emits.
pub fn reassemble(blocks: &[[u8; 64]], padded_h: usize, padded_w: usize) -> Plane {
    debug_assert_eq!(padded_h % BLOCK_SIZE, 0);
    debug_assert_eq!(padded_w % BLOCK_SIZE, 0);

    let blocks_per_row = padded_w / BLOCK_SIZE;
    let mut data = vec![0u8; padded_h * padded_w];

    for (idx, block) in blocks.iter().enumerate() {
        let block_row = idx / blocks_per_row;
        let block_col = idx % blocks_per_row;
        for r in 0..BLOCK_SIZE {
            for c in 0..BLOCK_SIZE {
                let row = block_row * BLOCK_SIZE + r;
                let col = block_col * BLOCK_SIZE + c;
                data[row * padded_w + col] = block[r * BLOCK_SIZE + c];
            }
        }
    }

    Plane::new(data, padded_h, padded_w)
}

/// Crop a plane's top-left `height × width` region (e.g. the padded plane
/// back down to its logical channel size).
pub fn crop(plane: &Plane, height: usize, width: usize) -> Plane {
    let mut data = Vec::with_capacity(height * width);
    for row in 0..height {
        let start = row * plane.width;
        data.extend_from_slice(&plane.data[start..start + width]);
    }
    Plane::new(data, height, width)
}

/// 4:2:0 subsample: each output sample is the rounded mean of its 2×2
/// input region, with edge regions averaging only the samples that exist.
/// Output dimensions are `⌈H/2⌉ × ⌈W/2⌉`.
pub fn subsample_420(plane: &Plane) -> Plane {
    let out_h = plane.height.div_ceil(2);
    let out_w = plane.width.div_ceil(2);
    let mut data = vec![0u8; out_h * out_w];

    for out_row in 0..out_h {
        for out_col in 0..out_w {
            let row_end = (out_row * 2 + 2).min(plane.height);
            let col_end = (out_col * 2 + 2).min(plane.width);
            let row_start = out_row * 2;
            let col_start = out_col * 2;

            let mut sum = 0.0f64;
            let mut count = 0usize;
            for r in row_start..row_end {
                for c in col_start..col_end {
                    sum += f64::from(plane.get(r, c));
                    count += 1;
                }
            }
            data[out_row * out_w + out_col] = (sum / count as f64).round() as u8;
        }
    }

    Plane::new(data, out_h, out_w)
}

/// Nearest-neighbor upsample: replicate each chroma sample into a 2×2
/// block, then crop to `(target_height, target_width)`.
pub fn upsample_nearest(plane: &Plane, target_height: usize, target_width: usize) -> Plane {
    if plane.data.is_empty() {
        return Plane::new(vec![PAD_FILL; target_height * target_width], target_height, target_width);
    }

    let mut data = vec![0u8; target_height * target_width];
    for row in 0..target_height {
        let src_row = (row / 2).min(plane.height - 1);
        for col in 0..target_width {
            let src_col = (col / 2).min(plane.width - 1);
            data[row * target_width + col] = plane.get(src_row, src_col);
        }
    }

    Plane::new(data, target_height, target_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_reassemble_round_trip() {
        let plane = Plane::new((0..25u32).map(|v| v as u8).collect(), 5, 5);
        let padded = pad(&plane);
        assert_eq!((padded.height, padded.width), (8, 8));

        let blocks = tile(&padded);
        assert_eq!(blocks.len(), 1);

        let shifted: Vec<[u8; 64]> = blocks
            .iter()
            .map(|b| {
                let mut out = [0u8; 64];
                for (o, &v) in out.iter_mut().zip(b.iter()) {
                    *o = (v + 128.0).round() as u8;
                }
                out
            })
            .collect();

        let reassembled = reassemble(&shifted, 8, 8);
        let cropped = crop(&reassembled, 5, 5);
        assert_eq!(cropped, plane);
    }

    #[test]
    fn subsample_output_dims_match_spec_scenario_g() {
        let plane = Plane::new(vec![0u8; 25], 5, 5);
        let sub = subsample_420(&plane);
        assert_eq!((sub.height, sub.width), (3, 3));
        let padded = pad(&sub);
        assert_eq!((padded.height, padded.width), (8, 8));
    }

    #[test]
    fn subsample_averages_2x2_regions() {
        let data = vec![0, 0, 100, 100, 0, 0, 100, 100];
        let plane = Plane::new(data, 2, 4);
        let sub = subsample_420(&plane);
        assert_eq!(sub.data, vec![0, 100]);
    }

    #[test]
    fn upsample_replicates_and_crops() {
        let plane = Plane::new(vec![1, 2, 3, 4], 2, 2);
        let up = upsample_nearest(&plane, 3, 3);
        assert_eq!(up.height, 3);
        assert_eq!(up.width, 3);
        assert_eq!(up.data, vec![1, 1, 2, 1, 1, 2, 3, 3, 4]);
    }

    #[test]
    fn upsample_of_empty_plane_fills_neutral_gray() {
        let plane = Plane::new(vec![], 0, 0);
        let up = upsample_nearest(&plane, 2, 2);
        assert!(up.data.iter().all(|&v| v == PAD_FILL));
    }
}
