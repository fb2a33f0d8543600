//! The container around an encoded bit-stream.
//!
//! ```text
//! +---------+----------------------------------+
//! | padding | payload bits | `padding` 0-bits  |
//! | 1 byte  |        whole bytes, MSB first    |
//! +---------+----------------------------------+
//! ```
//!
//! `padding` is always in `1..=8`: a payload that already fills whole bytes is followed by
//! a full zero byte and a header of 8. A header of 0 is accepted when reading and means no
//! filler at all.

use crate::compressor::CodecError;
use crate::huffman::bitstream::BitBuffer;

if_tracing! {
    use tracing::{debug, warn};
}

pub const HEADER_LEN: usize = 1;

/// Number of filler bits needed after a payload of `bit_len` bits.
pub const fn padding_for(bit_len: usize) -> u8 {
    (8 - bit_len % 8) as u8
}

/// Prepends the padding header and pads the payload out to whole bytes.
pub fn frame(payload: &BitBuffer) -> Vec<u8> {
    let padding = padding_for(payload.len());
    let mut framed = Vec::with_capacity(HEADER_LEN + (payload.len() + padding as usize) / 8);
    framed.push(padding);
    // the unused tail of the last byte is already zero
    framed.extend_from_slice(payload.as_bytes());
    if padding == 8 {
        framed.push(0);
    }

    if_tracing! {
        debug!(target = "framing", payload_bits = payload.len(), padding, framed_len = framed.len(), "framed");
    }
    framed
}

/// Strips the header and the filler bits, returning the payload exactly as framed.
///
/// # Errors
///
/// [`CodecError::MissingHeader`] for empty input, [`CodecError::InvalidPadding`] for a
/// header above 8 or longer than the body, [`CodecError::NonZeroPadding`] if a filler bit
/// is set.
pub fn unframe(framed: &[u8]) -> Result<BitBuffer, CodecError> {
    let Some((&padding, body)) = framed.split_first() else {
        return Err(CodecError::MissingHeader);
    };

    let body_bits = body.len() * 8;
    if padding > 8 || padding as usize > body_bits {
        if_tracing! {
            warn!(target = "framing", padding, body_bits, "unframe failed: bad padding header");
        }
        return Err(CodecError::InvalidPadding { padding, body_bits });
    }

    let payload_bits = body_bits - padding as usize;
    let mut bits = BitBuffer::from_bytes(body.to_vec());
    if (payload_bits..body_bits).any(|index| bits.get(index) == Some(true)) {
        if_tracing! {
            warn!(target = "framing", padding, "unframe failed: filler bits are not zero");
        }
        return Err(CodecError::NonZeroPadding);
    }
    bits.truncate(payload_bits);

    if_tracing! {
        debug!(target = "framing", framed_len = framed.len(), padding, payload_bits, "unframed");
    }
    Ok(bits)
}
