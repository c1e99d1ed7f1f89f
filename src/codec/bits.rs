/// Byte <-> bit conversion at the payload boundary
use crate::error::{LinkError, LinkResult};
use std::ops::Deref;

/// Ordered sequence of binary values, one `u8` (0 or 1) per bit
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitStream(Vec<u8>);

impl BitStream {
    /// Wrap raw bits. Every value must be 0 or 1.
    pub fn from_bits(bits: Vec<u8>) -> LinkResult<Self> {
        if let Some(pos) = bits.iter().position(|&b| b > 1) {
            return Err(LinkError::invalid_parameter(
                "bits",
                format!("value {} at position {} is not a bit", bits[pos], pos),
            ));
        }
        Ok(Self(bits))
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Number of I/Q symbol pairs carried by this stream
    pub fn symbol_pairs(&self) -> usize {
        self.0.len() / 2
    }

    pub fn is_paired(&self) -> bool {
        self.0.len() % 2 == 0
    }
}

impl Deref for BitStream {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

/// Expand each byte to its 8 big-endian bits, in input order
pub fn bytes_to_bits(bytes: &[u8]) -> BitStream {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for bit_idx in 0..8 {
            bits.push((byte >> (7 - bit_idx)) & 1);
        }
    }
    BitStream(bits)
}

/// Fold `count` bits back into bytes (MSB first)
pub fn bits_to_bytes(bits: &[u8], count: usize) -> LinkResult<Vec<u8>> {
    if count % 8 != 0 {
        return Err(LinkError::invalid_length(
            "bit codec",
            format!("{} bits is not a whole number of bytes", count),
        ));
    }
    if count != bits.len() {
        return Err(LinkError::invalid_length(
            "bit codec",
            format!("expected {} bits, stream holds {}", count, bits.len()),
        ));
    }

    let bytes = bits
        .chunks_exact(8)
        .map(|chunk| {
            chunk
                .iter()
                .fold(0u8, |acc, &bit| (acc << 1) | (bit & 1))
        })
        .collect();
    Ok(bytes)
}
