use core::fmt;

use crate::compressor::{CodecError, Compressed, Compressor, Result};

if_tracing! {
    use tracing::{Level, info, span};
}

pub mod bitstream;
pub mod encoding_map;
pub mod framing;
pub mod frequency;
pub mod node;
pub mod tree;

pub use bitstream::BitBuffer;
pub use encoding_map::{Code, EncodingMap, InvalidBit};
pub use frequency::{FrequencyTable, SymbolCount, TableError};
pub use node::Node;
pub use tree::HuffmanTree;

/// Static Huffman coding of text, one symbol per `char`.
#[derive(Clone, Copy, Debug, Default)]
pub struct HuffmanCoding;

impl Compressor for HuffmanCoding {
    fn compress(&mut self, text: &str) -> Result<Compressed> {
        if_tracing! {
            let span = span!(Level::INFO, "huffman", func = "compress");
            let _enter = span.enter();
        }

        let table = FrequencyTable::from_text(text);
        let tree = HuffmanTree::from_frequencies(&table)?;
        let map = EncodingMap::from_tree(&tree);
        let bits = bitstream::encode(text, &map)?;
        let payload = framing::frame(&bits);

        if_tracing! {
            info!(input_len = text.len(), symbols = table.len(), payload_len = payload.len(), "compress finished");
        }
        Ok(Compressed { payload, table })
    }

    fn decompress(&mut self, compressed: &Compressed) -> Result<String> {
        if_tracing! {
            let span = span!(Level::INFO, "huffman", func = "decompress");
            let _enter = span.enter();
        }

        let bits = framing::unframe(&compressed.payload)?;
        let tree = HuffmanTree::from_frequencies(&compressed.table)?;
        let text = bitstream::decode(&bits, &tree)?;

        let decoded = text.chars().count() as u64;
        if decoded != tree.weight() {
            return Err(CodecError::LengthMismatch {
                expected: tree.weight(),
                decoded,
            }
            .into());
        }

        if_tracing! {
            info!(payload_len = compressed.payload.len(), output_len = text.len(), "decompress finished");
        }
        Ok(text)
    }

    fn compressor_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for HuffmanCoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Huffman Coding")
    }
}
