//! Canonical Huffman table construction and symbol encode/decode.
//!
//! Construction follows `SludgePhD-zune-jpeg/src/huffman.rs`'s
//! `make_derived_table` (figures C.1/C.2 of the JPEG spec); the decode
//! side follows `original_source/huffman_coding.py`'s bit-at-a-time,
//! string-keyed `decode_table` rather than that file's `maxcode`/`offset`
//! lookahead — spec.md §4.4 permits either, and the straightforward one
//! reads clearer here.
use std::collections::HashMap;

use crate::errors::{DecodeErrors, EncodeErrors};

/// A canonical Huffman table built from per-length symbol counts (`bits`)
/// and a symbol ordering (`huffval`).
pub struct HuffmanTable {
    /// Number of codes of each length `1..=16`.
    bits:       [u8; 16],
    /// Symbols in canonical code order.
    huffval:    Vec<u8>,
    /// symbol -> (code, length)
    encode_map: HashMap<u8, (u16, u8)>,
    /// (code, length) -> symbol
    decode_map: HashMap<(u16, u8), u8>,
    max_code_len: u8
}

impl HuffmanTable {
    /// Build a canonical table from length counts and symbol order.
    ///
    /// # Errors
    /// Returns `InvalidTable` if the counts sum to more than 256, or if a
    /// code overflows its length (the counts don't form a complete
    /// prefix-free tree).
    pub fn new(bits: [u8; 16], huffval: Vec<u8>) -> Result<HuffmanTable, DecodeErrors> {
        let total: usize = bits.iter().map(|&b| b as usize).sum();
        if total > 256 {
            return Err(DecodeErrors::InvalidTable(format!(
                "Huffman bits sum to {total}, which exceeds 256"
            )));
        }
        if total != huffval.len() {
            return Err(DecodeErrors::InvalidTable(format!(
                "Huffman bits sum to {total} but huffval has {} symbols",
                huffval.len()
            )));
        }

        let mut encode_map = HashMap::with_capacity(total);
        let mut decode_map = HashMap::with_capacity(total);
        let mut max_code_len = 0u8;

        let mut code: u32 = 0;
        let mut huffval_idx = 0usize;

        for length in 1..=16u8 {
            let count = bits[(length - 1) as usize];
            for _ in 0..count {
                if code >= (1u32 << length) {
                    return Err(DecodeErrors::InvalidTable(format!(
                        "Huffman code overflowed length {length}, bad table"
                    )));
                }
                let symbol = huffval[huffval_idx];
                huffval_idx += 1;

                encode_map.insert(symbol, (code as u16, length));
                decode_map.insert((code as u16, length), symbol);

                code += 1;
            }
            if count > 0 {
                max_code_len = length;
            }
            code <<= 1;
        }

        Ok(HuffmanTable {
            bits,
            huffval,
            encode_map,
            decode_map,
            max_code_len
        })
    }

    /// Look up the `(code, length)` pair for a symbol.
    ///
    /// # Errors
    /// Returns `InvalidTable` if the table has no code for `symbol`.
    pub fn get_code(&self, symbol: u8) -> Result<(u16, u8), EncodeErrors> {
        self.encode_map.get(&symbol).copied().ok_or_else(|| {
            EncodeErrors::InvalidTable(format!("No Huffman code for symbol 0x{symbol:02X}"))
        })
    }

    /// Longest-prefix-match a symbol one bit at a time from `read_bit`.
    ///
    /// `read_bit` returns `None` on end of stream; this mirrors
    /// `HuffmanTable.decode_symbol` in `original_source/huffman_coding.py`.
    /// Returns `None` if no valid code is found within `max_code_len` bits.
    pub fn decode_symbol(&self, mut read_bit: impl FnMut() -> Option<u8>) -> Option<u8> {
        let mut code: u16 = 0;
        for length in 1..=self.max_code_len {
            let bit = read_bit()?;
            code = (code << 1) | u16::from(bit);
            if let Some(&symbol) = self.decode_map.get(&(code, length)) {
                return Some(symbol);
            }
        }
        None
    }

    pub fn bits(&self) -> &[u8; 16] {
        &self.bits
    }

    pub fn huffval(&self) -> &[u8] {
        &self.huffval
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::huffman_tables::{DC_LUMINANCE_BITS, DC_LUMINANCE_HUFFVAL};

    fn toy_table() -> HuffmanTable {
        // 2 codes of length 1, 1 code of length 2: a, b, c
        HuffmanTable::new(
            [2, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            vec![b'a', b'b', b'c']
        )
        .unwrap()
    }

    #[test]
    fn is_prefix_free_and_self_decoding() {
        let table = toy_table();
        for &symbol in &[b'a', b'b', b'c'] {
            let (code, len) = table.get_code(symbol).unwrap();
            let mut bits = (0..len).rev().map(|i| Some(((code >> i) & 1) as u8));
            assert_eq!(table.decode_symbol(|| bits.next().flatten()), Some(symbol));
        }
    }

    #[test]
    fn default_tables_build_cleanly() {
        let table = HuffmanTable::new(DC_LUMINANCE_BITS, DC_LUMINANCE_HUFFVAL.to_vec()).unwrap();
        assert_eq!(table.huffval().len(), 12);
    }

    #[test]
    fn mismatched_counts_rejected() {
        assert!(HuffmanTable::new([1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], vec![]).is_err());
    }

    #[test]
    fn end_of_stream_returns_none() {
        let table = toy_table();
        assert_eq!(table.decode_symbol(|| None), None);
    }
}
