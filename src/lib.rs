//! huffpack: Huffman compression of text.
//!
//! The codec lives in [`huffman`]: count symbol frequencies, build a tree, derive a
//! prefix-free code, pack the bits behind a one-byte padding header. Decompression
//! rebuilds the same tree from the persisted frequency table, so a compressed text is
//! always a pair of artifacts: the framed payload and its sibling `.freq.json` file
//! (see [`archive`]).
//!
//! ```
//! use huffpack::compressor::Compressor;
//! use huffpack::huffman::HuffmanCoding;
//!
//! let mut codec = HuffmanCoding;
//! let compressed = codec.compress("aabbbcc")?;
//! assert_eq!(codec.decompress(&compressed)?, "aabbbcc");
//! # Ok::<(), anyhow::Error>(())
//! ```

#[macro_export]
macro_rules! if_tracing {
    {$($body:tt)*} => {
        ::cfg_if::cfg_if! {
            if #[cfg(feature = "tracing")] {
                $($body)*
            }
        }
    };
}

pub mod archive;
pub mod cli;
pub mod compressor;
pub mod huffman;
pub mod storage;

#[cfg(test)]
mod tests;
