pub use anyhow::Result;
use thiserror::Error;

use crate::huffman::FrequencyTable;

/// Represents an error emitted by the codec while compressing or decompressing text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A Huffman tree needs at least one symbol.
    #[error("cannot build a Huffman tree from empty input")]
    EmptyInput,

    /// The encoding map was not derived from this input.
    #[error("symbol {0:?} has no code in the encoding map")]
    MissingSymbol(char),

    /// The bit-stream ended in the middle of a code.
    #[error("bit-stream ended {trailing_bits} bit(s) into an incomplete code")]
    TruncatedCode { trailing_bits: usize },

    /// A bit led to no symbol. Only possible with a single-symbol tree.
    #[error("bit {position} does not belong to any code")]
    InvalidCode { position: usize },

    /// The container was empty, so there was no padding header to read.
    #[error("container is missing its padding header")]
    MissingHeader,

    /// The padding header could not describe the body that followed it.
    #[error("invalid padding header {padding} for a body of {body_bits} bit(s)")]
    InvalidPadding { padding: u8, body_bits: usize },

    /// The filler bits at the end of the body were not all zero.
    #[error("padding bits at the end of the container are not zero")]
    NonZeroPadding,

    /// The decoded text does not match the length recorded by the frequency table.
    #[error("decoded {decoded} symbol(s) but the frequency table expects {expected}")]
    LengthMismatch { expected: u64, decoded: u64 },
}

/// The in-memory form of the two artifacts produced by compression.
///
/// Both halves are required to get the text back: `payload` is the framed bit-stream and
/// `table` is the frequency table the decoder rebuilds the tree from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Compressed {
    pub payload: Vec<u8>,
    pub table: FrequencyTable,
}

/// Represents shared behavior for text compressors.
///
/// Provides a method [`compress`](Compressor::compress) to compress text and
/// [`decompress`](Compressor::decompress) to get it back.
///
/// # Note
///
/// No guarantees are made about the size of the resulting [`Compressed`].
/// The only guarantee is that [`decompress`](Compressor::decompress) reconstructs the
/// original text exactly.
pub trait Compressor {
    /// Compresses the given text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be compressed, for example when it is empty.
    fn compress(&mut self, text: &str) -> Result<Compressed>;

    /// Decompresses a payload together with the frequency table it was compressed with.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is malformed or does not belong to the table.
    fn decompress(&mut self, compressed: &Compressed) -> Result<String>;

    /// Performs a round-trip test on the compressor.
    ///
    /// Use for sanity checking the compressor and decompressor.
    fn test_roundtrip<'orig>(&mut self, text: &'orig str) -> Result<RoundTripTestResult<'orig>> {
        let compressed = self.compress(text)?;
        let decompressed = self.decompress(&compressed)?;
        let equal = text == decompressed;

        Ok(RoundTripTestResult {
            equal,
            original: text,
            compressed,
            decompressed,
        })
    }

    /// Returns the name of the compressor algorithm.
    fn compressor_name(&self) -> String {
        core::any::type_name::<Self>().to_string()
    }
}

/// Represents the result of a round-trip test.
///
/// Use accessor methods to retrieve the [`result`][RoundTripTestResult::is_successful],
/// the [`original text`][RoundTripTestResult::get_original],
/// the [`compressed artifacts`][RoundTripTestResult::get_compressed],
/// and the [`decompressed text`][RoundTripTestResult::get_decompressed].
#[derive(Clone, Debug)]
pub struct RoundTripTestResult<'orig> {
    pub(crate) equal: bool,
    pub(crate) original: &'orig str,
    pub(crate) compressed: Compressed,
    pub(crate) decompressed: String,
}

impl<'orig> RoundTripTestResult<'orig> {
    /// Whether the original and decompressed text were equal.
    pub const fn is_successful(&self) -> bool {
        self.equal
    }

    /// The original text before any action was taken.
    pub const fn get_original(&self) -> &'orig str {
        self.original
    }

    /// The artifacts produced by the compressor.
    pub const fn get_compressed(&self) -> &Compressed {
        &self.compressed
    }

    /// The text after it has been decoded by the decompressor.
    pub fn get_decompressed(&self) -> &str {
        self.decompressed.as_str()
    }
}
