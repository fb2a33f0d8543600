use voxell_rng::rng::XorShift128;

use crate::compressor::Compressor;

const SHORT_DATA: &str = "Hello, World!";
const LONG_DATA: &str =
    "This is a longer string to test the Huffman coding algorithm. It should be able to handle various lengths and characters.";
const REPEATING_DATA: &str = "a baba da babble da dabble babble doo bee babble dabble dooble dee boo dooble daddle boo";
const SINGLE_SYMBOL_DATA: &str = "aaaa";
const TWO_SYMBOL_DATA: &str = "abababababbbbbbbbbba";
const LINE_DATA: &str = "first line\r\nsecond line\n\tindented\r\n\r\nlast";
const UNICODE_DATA: &str = "naïve café, 東京, Ελληνικά, \u{1F980}\u{1F980}\u{1F980} and a zero \u{0} byte";
const ALIGNED_DATA: &str = "aabbccdd";

const TEST_CASES: &[(&str, &str)] = &[
    (REPEATING_DATA, "repeating data"),
    (SHORT_DATA, "short data"),
    (LONG_DATA, "long data"),
    (SINGLE_SYMBOL_DATA, "single symbol"),
    (TWO_SYMBOL_DATA, "two symbols"),
    (LINE_DATA, "mixed line endings"),
    (UNICODE_DATA, "unicode data"),
    (ALIGNED_DATA, "byte-aligned payload"),
];

/// Pseudo-random text over a skewed alphabet, so the tree gets some depth.
pub fn rng_text(len: usize) -> String {
    const ALPHABET: &[char] = &['e', 'e', 'e', 'e', 't', 't', 't', 'a', 'a', 'o', 'n', ' ', ' ', 'x', 'q', 'é', '\n'];
    let mut rng = XorShift128::new(0xdeadcafe);
    let mut text = String::with_capacity(len);
    for _ in 0..len {
        let data = rng.peek_next_u64();
        text.push(ALPHABET[(data % ALPHABET.len() as u64) as usize]);
        rng = XorShift128::new(data);
    }
    text
}

pub fn roundtrip_test<C: Compressor>(mut compressor: C) {
    let rng_data = rng_text(1000);
    let mut cases: Vec<(&str, &str)> = TEST_CASES.to_vec();
    cases.push((&rng_data, "rng data"));

    for (test_case, test_name) in cases {
        match compressor.test_roundtrip(test_case) {
            Ok(eq) => {
                let ratio = compression_ratio(eq.get_original(), eq.get_compressed().payload.len());

                eprintln!(
                    "Compression ratio for {} with {}: {:.2}%",
                    test_name,
                    compressor.compressor_name(),
                    ratio * 100.0
                );

                assert!(
                    eq.is_successful(),
                    "Roundtrip test for {} failed at {}:\n\tExpected: {:?}\n\tGot: {:?}\n\tCompressed: {:?}",
                    compressor.compressor_name(),
                    test_name,
                    eq.get_original(),
                    eq.get_decompressed(),
                    eq.get_compressed(),
                );
            }
            Err(e) => {
                panic!(
                    "Fatal error while trying to compress/decompress {} with {}: {}",
                    test_name,
                    compressor.compressor_name(),
                    e
                );
            }
        }
    }
}

/// Payload size over original size. Does not count the frequency table.
pub fn compression_ratio(original: &str, compressed_len: usize) -> f64 {
    if original.is_empty() {
        return 0.0;
    }
    compressed_len as f64 / original.len() as f64
}

#[test]
fn aligned_data_fills_whole_bytes() {
    use crate::huffman::{EncodingMap, FrequencyTable, HuffmanTree};

    let table = FrequencyTable::from_text(ALIGNED_DATA);
    let map = EncodingMap::from_tree(&HuffmanTree::from_frequencies(&table).unwrap());
    assert_eq!(map.encoded_len(&table) % 8, 0);
}

#[test]
fn rng_text_is_deterministic() {
    assert_eq!(rng_text(64), rng_text(64));
    assert_eq!(rng_text(64).chars().count(), 64);
}
