use core::fmt;

use crate::compressor::CodecError;
use crate::huffman::encoding_map::{Code, EncodingMap};
use crate::huffman::node::Node;
use crate::huffman::tree::HuffmanTree;

if_tracing! {
    use tracing::{debug, info, warn};
}

/// A string of bits packed most-significant-bit first.
///
/// Bits past `bit_count` in the last byte are always zero.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    bytes: Vec<u8>,
    bit_count: usize,
}

impl BitBuffer {
    pub fn new() -> Self {
        BitBuffer {
            bytes: Vec::new(),
            bit_count: 0,
        }
    }

    pub fn with_capacity(bits: usize) -> Self {
        BitBuffer {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            bit_count: 0,
        }
    }

    /// Takes every bit of `bytes`.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let bit_count = bytes.len() * 8;
        BitBuffer { bytes, bit_count }
    }

    pub fn len(&self) -> usize {
        self.bit_count
    }

    /// Bits the buffer can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.bytes.capacity() * 8
    }

    pub fn is_empty(&self) -> bool {
        self.bit_count == 0
    }

    /// The packed bits. The last byte is zero-filled past the end.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn push(&mut self, bit: bool) {
        let byte_index = self.bit_count / 8;
        let bit_offset = self.bit_count % 8;

        if byte_index >= self.bytes.len() {
            self.bytes.push(0);
        }

        if bit {
            self.bytes[byte_index] |= 1 << (7 - bit_offset);
        }

        self.bit_count += 1;
    }

    pub fn extend_from_bits(&mut self, bits: &[bool]) {
        for &bit in bits {
            self.push(bit);
        }
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.bit_count {
            return None;
        }
        Some(self.bytes[index / 8] & (1 << (7 - index % 8)) != 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.bit_count).map(|index| self.bytes[index / 8] & (1 << (7 - index % 8)) != 0)
    }

    /// Drops every bit from `len` on. Does nothing if the buffer is already shorter.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.bit_count {
            return;
        }
        self.bytes.truncate(len.div_ceil(8));
        let used = len % 8;
        if used != 0
            && let Some(last) = self.bytes.last_mut()
        {
            *last &= 0xFF << (8 - used);
        }
        self.bit_count = len;
    }
}

impl FromIterator<bool> for BitBuffer {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut buffer = BitBuffer::new();
        for bit in iter {
            buffer.push(bit);
        }
        buffer
    }
}

impl fmt::Display for BitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for BitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitBuffer")
            .field("bit_count", &self.bit_count)
            .field("bits", &format_args!("{}", self))
            .finish()
    }
}

/// Concatenates the code of every symbol of `text`, in order.
///
/// `map` must have been derived from this text's frequency table.
///
/// # Errors
///
/// Returns [`CodecError::MissingSymbol`] for the first symbol without a code.
pub fn encode(text: &str, map: &EncodingMap) -> Result<BitBuffer, CodecError> {
    if_tracing! {
        debug!(target = "huffman", input_len = text.len(), codes = map.len(), "encode start");
    }

    let mut bits = BitBuffer::with_capacity(encoded_bits(text, map));
    for symbol in text.chars() {
        let Some(code) = map.get(symbol) else {
            if_tracing! {
                warn!(target = "huffman", symbol = ?symbol, "encode failed: symbol has no code");
            }
            return Err(CodecError::MissingSymbol(symbol));
        };
        bits.extend_from_bits(code.bits());
    }

    if_tracing! {
        info!(target = "huffman", input_len = text.len(), output_bits = bits.len(), "encode complete");
    }
    Ok(bits)
}

/// Number of bits `encode` produces for the symbols of `text` that have a code.
fn encoded_bits(text: &str, map: &EncodingMap) -> usize {
    text.chars().filter_map(|symbol| map.get(symbol)).map(Code::len).sum()
}

/// Walks `tree` bit by bit, emitting a symbol at every leaf and starting over at the root.
///
/// # Errors
///
/// Returns [`CodecError::TruncatedCode`] if the bits run out in the middle of a code, and
/// [`CodecError::InvalidCode`] for a 1-bit fed to a single-symbol tree.
pub fn decode(bits: &BitBuffer, tree: &HuffmanTree) -> Result<String, CodecError> {
    if_tracing! {
        debug!(target = "huffman", input_bits = bits.len(), "decode start");
    }

    let root = tree.root();
    let mut text = String::new();

    if let Node::Leaf { symbol, .. } = root {
        // the only code is `0`
        for (position, bit) in bits.iter().enumerate() {
            if bit {
                if_tracing! {
                    warn!(target = "huffman", position, "decode failed: 1-bit in a single-symbol stream");
                }
                return Err(CodecError::InvalidCode { position });
            }
            text.push(*symbol);
        }
        return Ok(text);
    }

    let mut cursor = root;
    let mut code_len = 0usize;
    for (position, bit) in bits.iter().enumerate() {
        let Some(next) = cursor.child(bit) else {
            return Err(CodecError::InvalidCode { position });
        };
        match next {
            Node::Leaf { symbol, .. } => {
                text.push(*symbol);
                cursor = root;
                code_len = 0;
            }
            Node::Internal { .. } => {
                cursor = next;
                code_len += 1;
            }
        }
    }

    if code_len != 0 {
        if_tracing! {
            warn!(target = "huffman", trailing_bits = code_len, "decode failed: stream ends mid-code");
        }
        return Err(CodecError::TruncatedCode { trailing_bits: code_len });
    }

    if_tracing! {
        info!(target = "huffman", input_bits = bits.len(), output_len = text.len(), "decode complete");
    }
    Ok(text)
}
