//! The per-component encode/decode orchestrator: DCT, quantization, DC
//! DPCM, AC RLE, and Huffman entropy coding tying every leaf module
//! together, plus the container framing.
//!
//! Grounded on `original_source/compressor.py::compress_image` and
//! `decompressor.py::decompress_image`; the per-component loop itself
//! follows spec.md §9's fixed-arity `ComponentPlan` redesign (see
//! `component.rs`) in place of the source's name-keyed dict, and the
//! teacher's `mcu.rs`/`worker.rs` for the shape of "one pass per
//! component, sequential within a component".
use crate::bitstream::{BitReader, BitWriter};
use crate::block::{self, Plane, BLOCK_SIZE};
use crate::component::{ComponentKind, COMPONENT_ORDER};
use crate::container::{self, Header};
use crate::dct::{forward_dct, inverse_dct};
use crate::errors::{DecodeErrors, EncodeErrors};
use crate::huffman::HuffmanTable;
use crate::huffman_tables as default_tables;
use crate::options::{DecoderOptions, EncoderOptions};
use crate::quantization::{self, BASE_Q_CHROMINANCE, BASE_Q_LUMINANCE};
use crate::rle::{self, RlePair};
use crate::vli;
use crate::zigzag::{inverse_zigzag, zigzag};

/// The four fixed Huffman tables used by every image: one DC/AC pair for
/// luminance, one for chrominance.
struct TableSet {
    dc: HuffmanTable,
    ac: HuffmanTable
}

struct DefaultTables {
    luma:   TableSet,
    chroma: TableSet
}

fn build_default_tables() -> Result<DefaultTables, DecodeErrors> {
    Ok(DefaultTables {
        luma: TableSet {
            dc: HuffmanTable::new(
                default_tables::DC_LUMINANCE_BITS,
                default_tables::DC_LUMINANCE_HUFFVAL.to_vec()
            )?,
            ac: HuffmanTable::new(
                default_tables::AC_LUMINANCE_BITS,
                default_tables::AC_LUMINANCE_HUFFVAL.to_vec()
            )?
        },
        chroma: TableSet {
            dc: HuffmanTable::new(
                default_tables::DC_CHROMINANCE_BITS,
                default_tables::DC_CHROMINANCE_HUFFVAL.to_vec()
            )?,
            ac: HuffmanTable::new(
                default_tables::AC_CHROMINANCE_BITS,
                default_tables::AC_CHROMINANCE_HUFFVAL.to_vec()
            )?
        }
    })
}

impl DefaultTables {
    fn for_kind(&self, kind: ComponentKind) -> &TableSet {
        if kind.is_luma() {
            &self.luma
        } else {
            &self.chroma
        }
    }
}

/// DC differential coding: `diffs[0] = dc[0]`, `diffs[i] = dc[i] - dc[i-1]`.
fn dpcm_encode(dc_coeffs: &[i32]) -> Vec<i32> {
    let mut diffs = Vec::with_capacity(dc_coeffs.len());
    let mut prev = 0i32;
    for (i, &dc) in dc_coeffs.iter().enumerate() {
        diffs.push(if i == 0 { dc } else { dc - prev });
        prev = dc;
    }
    diffs
}

/// Inverse of [`dpcm_encode`].
fn dpcm_decode(diffs: &[i32]) -> Vec<i32> {
    let mut coeffs = Vec::with_capacity(diffs.len());
    let mut prev = 0i32;
    for (i, &diff) in diffs.iter().enumerate() {
        let dc = if i == 0 { diff } else { diff + prev };
        coeffs.push(dc);
        prev = dc;
    }
    coeffs
}

/// Encode one data unit's Huffman symbols into `writer`.
fn write_data_unit(
    writer: &mut BitWriter, dc_diff: i32, ac_pairs: &[RlePair], tables: &TableSet
) -> Result<(), EncodeErrors> {
    let (dc_category, (dc_bits, dc_len)) = vli::encode(dc_diff)?;
    let (code, len) = tables.dc.get_code(dc_category)?;
    writer.write_bits(code, len);
    if dc_category > 0 {
        writer.write_bits(dc_bits, dc_len);
    }

    for &pair in ac_pairs {
        if pair.is_eob() {
            let (code, len) = tables.ac.get_code(0x00)?;
            writer.write_bits(code, len);
            break;
        } else if pair.is_zrl() {
            let (code, len) = tables.ac.get_code(0xF0)?;
            writer.write_bits(code, len);
        } else {
            let (ac_category, (ac_bits, ac_len)) = vli::encode(pair.value)?;
            if ac_category == 0 || ac_category > 15 {
                return Err(EncodeErrors::NumericRange(format!(
                    "AC VLI category {ac_category} out of [1,15]"
                )));
            }
            if pair.run > 15 {
                return Err(EncodeErrors::NumericRange(format!("AC run {} out of [0,15]", pair.run)));
            }
            let symbol = (pair.run << 4) | ac_category;
            let (code, len) = tables.ac.get_code(symbol)?;
            writer.write_bits(code, len);
            writer.write_bits(ac_bits, ac_len);
        }
    }
    Ok(())
}

/// Encode one channel plane: pad, tile, DCT+quantize each block, DPCM the
/// DCs, then Huffman-encode every data unit. Returns the entropy payload
/// and the padded dimensions the decoder needs to reconstruct geometry.
fn encode_component(
    plane: &Plane, q_matrix: &[u8; 64], tables: &TableSet
) -> Result<(Vec<u8>, (usize, usize)), EncodeErrors> {
    let padded = block::pad(plane);
    let blocks = block::tile(&padded);

    let mut quantized_blocks = Vec::with_capacity(blocks.len());
    let mut dc_coeffs = Vec::with_capacity(blocks.len());

    for centered in &blocks {
        let dct_block = forward_dct(centered);
        let quantized = quantization::quantize(&dct_block, q_matrix);
        dc_coeffs.push(quantized[0]);
        quantized_blocks.push(quantized);
    }

    let dc_diffs = dpcm_encode(&dc_coeffs);

    let mut writer = BitWriter::new();
    for (quantized, &dc_diff) in quantized_blocks.iter().zip(dc_diffs.iter()) {
        let scanned = zigzag(quantized);
        let ac_pairs = rle::encode(&scanned[1..64]);
        write_data_unit(&mut writer, dc_diff, &ac_pairs, tables)?;
    }

    log::debug!(
        "encoded component: {} blocks, padded {}x{}",
        blocks.len(),
        padded.height,
        padded.width
    );

    Ok((writer.finalize(), (padded.height, padded.width)))
}

/// Read one data unit's AC coefficients via the position state machine
/// from spec.md §4.9: `0x00` completes the block, `0xF0` (ZRL) advances
/// by 16 and keeps reading, anything else reads an `ac_category`-bit VLI
/// and advances by `run + 1`.
fn read_ac_pairs(reader: &mut BitReader, tables: &TableSet) -> Result<Vec<RlePair>, DecodeErrors> {
    let mut pairs = Vec::new();
    let mut position = 0usize;

    while position < 63 {
        let Some(symbol) = tables.ac.decode_symbol(|| reader.read_bit()) else {
            return Err(DecodeErrors::CorruptBitstream(
                "end of stream while decoding AC symbol".to_string()
            ));
        };

        if symbol == 0x00 {
            pairs.push(RlePair::EOB);
            break;
        } else if symbol == 0xF0 {
            pairs.push(RlePair::ZRL);
            position += 16;
        } else {
            let run = (symbol >> 4) & 0x0F;
            let category = symbol & 0x0F;
            if category == 0 || category > 15 {
                return Err(DecodeErrors::CorruptBitstream(format!(
                    "invalid AC symbol 0x{symbol:02X} (run={run}, category={category})"
                )));
            }
            let Some(bits) = reader.read_bits(category) else {
                return Err(DecodeErrors::CorruptBitstream(
                    "end of stream while decoding AC VLI bits".to_string()
                ));
            };
            let value = vli::decode(category, bits)?;
            pairs.push(RlePair { run, value });
            position += run as usize + 1;
        }

        if position > 63 {
            break;
        }
    }

    Ok(pairs)
}

/// Decode exactly `num_blocks` data units from `bytes`, reconstructing a
/// padded plane. On a `CorruptBitstream` fault, the remaining blocks are
/// zero-filled (DC stays at the last successfully decoded running total,
/// AC all zero) and decoding stops — unless `strict` is set, in which
/// case the error propagates.
fn decode_component(
    bytes: &[u8], tables: &TableSet, q_matrix: &[u8; 64], padded_h: usize, padded_w: usize,
    strict: bool
) -> Result<Plane, DecodeErrors> {
    let num_blocks = (padded_h / BLOCK_SIZE) * (padded_w / BLOCK_SIZE);
    let mut reader = BitReader::new(bytes);

    let mut dc_diffs = Vec::with_capacity(num_blocks);
    let mut ac_per_block = Vec::with_capacity(num_blocks);

    for block_idx in 0..num_blocks {
        let result: Result<(i32, Vec<RlePair>), DecodeErrors> = (|| {
            let Some(dc_category) = tables.dc.decode_symbol(|| reader.read_bit()) else {
                return Err(DecodeErrors::CorruptBitstream(format!(
                    "end of stream decoding DC category for block {block_idx}"
                )));
            };
            let dc_bits = if dc_category > 0 {
                reader.read_bits(dc_category).ok_or_else(|| {
                    DecodeErrors::CorruptBitstream(format!(
                        "end of stream decoding DC VLI bits for block {block_idx}"
                    ))
                })?
            } else {
                0
            };
            let dc_diff = vli::decode(dc_category, dc_bits)?;
            let ac_pairs = read_ac_pairs(&mut reader, tables)?;
            Ok((dc_diff, ac_pairs))
        })();

        match result {
            Ok((dc_diff, ac_pairs)) => {
                dc_diffs.push(dc_diff);
                ac_per_block.push(ac_pairs);
            }
            Err(e) => {
                if strict {
                    return Err(e);
                }
                log::warn!("corrupt bitstream at block {block_idx}: {e:?}, continuing with a zero-filled tail");
                break;
            }
        }
    }

    while dc_diffs.len() < num_blocks {
        dc_diffs.push(0);
        ac_per_block.push(vec![RlePair::EOB]);
    }

    let dc_coeffs = dpcm_decode(&dc_diffs);

    let mut out_blocks = Vec::with_capacity(num_blocks);
    for (ac_pairs, &dc) in ac_per_block.iter().zip(dc_coeffs.iter()) {
        let ac_coeffs = rle::decode(ac_pairs, 63);
        let mut scan = [0i32; 64];
        scan[0] = dc;
        scan[1..].copy_from_slice(&ac_coeffs);
        let quantized = inverse_zigzag(&scan);

        let dequantized = quantization::dequantize(&quantized, q_matrix);
        let spatial = inverse_dct(&dequantized);

        let mut block_u8 = [0u8; 64];
        for (o, &v) in block_u8.iter_mut().zip(spatial.iter()) {
            *o = (v + 128.0).round().clamp(0.0, 255.0) as u8;
        }
        out_blocks.push(block_u8);
    }

    Ok(block::reassemble(&out_blocks, padded_h, padded_w))
}

/// Encode an RGB image into a complete container byte stream.
///
/// # Errors
/// `InvalidInput` if the image is empty or `quality` is outside
/// `[1,100]`; `NumericRange`/`InvalidTable` if a coefficient or symbol
/// cannot be represented (should not happen with the default tables).
pub fn encode(rgb: &[u8], height: usize, width: usize, options: EncoderOptions) -> Result<Vec<u8>, EncodeErrors> {
    if height == 0 || width == 0 {
        return Err(EncodeErrors::InvalidInput("image dimensions must be >= 1".to_string()));
    }
    if rgb.len() != height * width * 3 {
        return Err(EncodeErrors::InvalidInput(format!(
            "expected {} bytes for {height}x{width} RGB, got {}",
            height * width * 3,
            rgb.len()
        )));
    }
    let quality = options.get_quality();
    if quality == 0 || quality > 100 {
        return Err(EncodeErrors::InvalidInput(format!("quality must be in [1,100], got {quality}")));
    }

    let ycbcr = crate::color_convert::rgb_to_ycbcr(rgb);
    let mut y_data = vec![0u8; height * width];
    let mut cb_data = vec![0u8; height * width];
    let mut cr_data = vec![0u8; height * width];
    for (i, px) in ycbcr.chunks_exact(3).enumerate() {
        y_data[i] = px[0];
        cb_data[i] = px[1];
        cr_data[i] = px[2];
    }

    let y_plane = Plane::new(y_data, height, width);
    let cb_plane = block::subsample_420(&Plane::new(cb_data, height, width));
    let cr_plane = block::subsample_420(&Plane::new(cr_data, height, width));

    let q_y = quantization::adjust(&BASE_Q_LUMINANCE, quality)?;
    let q_c = quantization::adjust(&BASE_Q_CHROMINANCE, quality)?;

    let tables = build_default_tables().map_err(|e| EncodeErrors::InvalidTable(format!("{e:?}")))?;

    let mut payloads: [Vec<u8>; 3] = Default::default();
    let mut padded_dims: [(usize, usize); 3] = Default::default();

    for (i, kind) in COMPONENT_ORDER.into_iter().enumerate() {
        let (plane, q_matrix) = match kind {
            ComponentKind::Y => (&y_plane, &q_y),
            ComponentKind::Cb => (&cb_plane, &q_c),
            ComponentKind::Cr => (&cr_plane, &q_c)
        };
        let (payload, padded) = encode_component(plane, q_matrix, tables.for_kind(kind))?;
        log::debug!("{}: compressed to {} bytes", kind.name(), payload.len());
        payloads[i] = payload;
        padded_dims[i] = padded;
    }

    let header = Header {
        original_width: width,
        original_height: height,
        block_size: BLOCK_SIZE,
        quality,
        padded_dims_y: padded_dims[0],
        padded_dims_cb: padded_dims[1],
        padded_dims_cr: padded_dims[2],
        q_table_y: q_y.to_vec(),
        q_table_c: q_c.to_vec(),
        huff_dc_y_bits: tables.luma.dc.bits().to_vec(),
        huff_dc_y_huffval: tables.luma.dc.huffval().to_vec(),
        huff_ac_y_bits: tables.luma.ac.bits().to_vec(),
        huff_ac_y_huffval: tables.luma.ac.huffval().to_vec(),
        huff_dc_c_bits: tables.chroma.dc.bits().to_vec(),
        huff_dc_c_huffval: tables.chroma.dc.huffval().to_vec(),
        huff_ac_c_bits: tables.chroma.ac.bits().to_vec(),
        huff_ac_c_huffval: tables.chroma.ac.huffval().to_vec(),
        data_len_y: payloads[0].len(),
        data_len_cb: payloads[1].len(),
        data_len_cr: payloads[2].len()
    };

    Ok(container::write(&header, &payloads[0], &payloads[1], &payloads[2]))
}

fn vec_to_bits16(v: &[u8]) -> Result<[u8; 16], DecodeErrors> {
    v.try_into()
        .map_err(|_| DecodeErrors::InvalidContainer(format!("expected 16 huffman bit counts, got {}", v.len())))
}

fn vec_to_q64(v: &[u8]) -> Result<[u8; 64], DecodeErrors> {
    v.try_into()
        .map_err(|_| DecodeErrors::InvalidContainer(format!("expected 64 quantization entries, got {}", v.len())))
}

/// Decode a container byte stream back into an RGB image.
///
/// # Errors
/// `InvalidContainer` on framing/header problems; `InvalidTable` if the
/// header's Huffman tables don't form a valid canonical code;
/// `CorruptBitstream` only escapes when `options` is in strict mode —
/// otherwise the decoder keeps a best-effort, zero-filled image.
pub fn decode(bytes: &[u8], options: DecoderOptions) -> Result<(Vec<u8>, usize, usize), DecodeErrors> {
    let parsed = container::parse(bytes)?;
    let header = parsed.header;

    let q_y = vec_to_q64(&header.q_table_y)?;
    let q_c = vec_to_q64(&header.q_table_c)?;

    let luma = TableSet {
        dc: HuffmanTable::new(vec_to_bits16(&header.huff_dc_y_bits)?, header.huff_dc_y_huffval.clone())?,
        ac: HuffmanTable::new(vec_to_bits16(&header.huff_ac_y_bits)?, header.huff_ac_y_huffval.clone())?
    };
    let chroma = TableSet {
        dc: HuffmanTable::new(vec_to_bits16(&header.huff_dc_c_bits)?, header.huff_dc_c_huffval.clone())?,
        ac: HuffmanTable::new(vec_to_bits16(&header.huff_ac_c_bits)?, header.huff_ac_c_huffval.clone())?
    };

    let strict = options.get_strict_mode();

    let y_reassembled = decode_component(
        parsed.y, &luma, &q_y, header.padded_dims_y.0, header.padded_dims_y.1, strict
    )?;
    let cb_reassembled = decode_component(
        parsed.cb, &chroma, &q_c, header.padded_dims_cb.0, header.padded_dims_cb.1, strict
    )?;
    let cr_reassembled = decode_component(
        parsed.cr, &chroma, &q_c, header.padded_dims_cr.0, header.padded_dims_cr.1, strict
    )?;

    let height = header.original_height;
    let width = header.original_width;
    let chroma_h = height.div_ceil(2);
    let chroma_w = width.div_ceil(2);

    let y = block::crop(&y_reassembled, height, width);
    let cb = block::crop(&cb_reassembled, chroma_h, chroma_w);
    let cr = block::crop(&cr_reassembled, chroma_h, chroma_w);

    let cb_up = block::upsample_nearest(&cb, height, width);
    let cr_up = block::upsample_nearest(&cr, height, width);

    let mut ycbcr = vec![0u8; height * width * 3];
    for i in 0..height * width {
        ycbcr[i * 3] = y.data[i];
        ycbcr[i * 3 + 1] = cb_up.data[i];
        ycbcr[i * 3 + 2] = cr_up.data[i];
    }

    let rgb = crate::color_convert::ycbcr_to_rgb(&ycbcr);
    Ok((rgb, height, width))
}
