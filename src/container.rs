//! The on-disk container: magic, length-prefixed JSON header, three
//! entropy-coded payloads.
//!
//! Grounded on `original_source/compressor.py`'s `metadata` dict (which is
//! `json.dumps`-ed verbatim) and the `zune-image` crate's `serde-support`
//! feature for using `serde` as the (de)serialization backend in this
//! family of crates.
use serde::{Deserialize, Serialize};

use crate::errors::DecodeErrors;

/// Six-byte ASCII magic that opens every container.
pub const MAGIC: &[u8; 6] = b"MYJPEG";

/// The container's JSON header. Field names match the JSON keys in
/// spec.md §6 verbatim under serde's default (de)serialization.
#[derive(Serialize, Deserialize)]
pub struct Header {
    pub original_width:  usize,
    pub original_height: usize,
    pub block_size:       usize,
    pub quality:          u8,
    pub padded_dims_y:    (usize, usize),
    pub padded_dims_cb:   (usize, usize),
    pub padded_dims_cr:   (usize, usize),
    pub q_table_y:        Vec<u8>,
    pub q_table_c:        Vec<u8>,
    pub huff_dc_y_bits:      Vec<u8>,
    pub huff_dc_y_huffval:   Vec<u8>,
    pub huff_ac_y_bits:      Vec<u8>,
    pub huff_ac_y_huffval:   Vec<u8>,
    pub huff_dc_c_bits:      Vec<u8>,
    pub huff_dc_c_huffval:   Vec<u8>,
    pub huff_ac_c_bits:      Vec<u8>,
    pub huff_ac_c_huffval:   Vec<u8>,
    pub data_len_y:  usize,
    pub data_len_cb: usize,
    pub data_len_cr: usize
}

/// Serialize the header as JSON and assemble the full container: magic,
/// big-endian header length, header, then the three payloads in Y, Cb, Cr
/// order.
pub fn write(header: &Header, y: &[u8], cb: &[u8], cr: &[u8]) -> Vec<u8> {
    let header_bytes = serde_json::to_vec(header).expect("Header is always serializable");

    let mut out = Vec::with_capacity(6 + 4 + header_bytes.len() + y.len() + cb.len() + cr.len());
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&(header_bytes.len() as u32).to_be_bytes());
    out.extend_from_slice(&header_bytes);
    out.extend_from_slice(y);
    out.extend_from_slice(cb);
    out.extend_from_slice(cr);
    out
}

/// Parsed container: the header plus byte slices for each component's
/// entropy payload (borrowed from the input).
pub struct Parsed<'a> {
    pub header: Header,
    pub y:      &'a [u8],
    pub cb:     &'a [u8],
    pub cr:     &'a [u8]
}

/// Parse and validate a container's framing (magic, header length, JSON
/// header, payload lengths). Does not interpret the header's contents
/// beyond checking all fields deserialize.
///
/// # Errors
/// Returns `InvalidContainer` on a magic mismatch, truncated header,
/// malformed JSON, or a payload length that runs past the end of `bytes`.
pub fn parse(bytes: &[u8]) -> Result<Parsed<'_>, DecodeErrors> {
    if bytes.len() < 6 {
        return Err(DecodeErrors::InvalidContainer("input shorter than magic".to_string()));
    }
    if &bytes[0..6] != MAGIC {
        return Err(DecodeErrors::InvalidContainer(format!(
            "bad magic: expected {MAGIC:?}, got {:?}",
            &bytes[0..6]
        )));
    }

    if bytes.len() < 10 {
        return Err(DecodeErrors::InvalidContainer("truncated header length field".to_string()));
    }
    let header_len = u32::from_be_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]) as usize;

    let header_start = 10;
    let header_end = header_start
        .checked_add(header_len)
        .filter(|&end| end <= bytes.len())
        .ok_or_else(|| DecodeErrors::InvalidContainer("header length runs past end of input".to_string()))?;

    let header: Header = serde_json::from_slice(&bytes[header_start..header_end])
        .map_err(|e| DecodeErrors::InvalidContainer(format!("malformed JSON header: {e}")))?;

    let y_start = header_end;
    let y_end = y_start.checked_add(header.data_len_y).filter(|&e| e <= bytes.len());
    let cb_start = y_end;
    let cb_end = cb_start.and_then(|s| s.checked_add(header.data_len_cb)).filter(|&e| e <= bytes.len());
    let cr_start = cb_end;
    let cr_end = cr_start.and_then(|s| s.checked_add(header.data_len_cr)).filter(|&e| e <= bytes.len());

    let (y_end, cb_start, cb_end, cr_start, cr_end) = match (y_end, cb_start, cb_end, cr_start, cr_end) {
        (Some(ye), Some(cbs), Some(cbe), Some(crs), Some(cre)) => (ye, cbs, cbe, crs, cre),
        _ => {
            return Err(DecodeErrors::InvalidContainer(
                "payload lengths run past end of input".to_string()
            ))
        }
    };

    Ok(Parsed {
        y: &bytes[y_start..y_end],
        cb: &bytes[cb_start..cb_end],
        cr: &bytes[cr_start..cr_end],
        header
    })
}
