use core::fmt;
use std::collections::BTreeMap;

use thiserror::Error;

use crate::huffman::frequency::FrequencyTable;
use crate::huffman::node::Node;
use crate::huffman::tree::HuffmanTree;

/// The bits assigned to one symbol. `false` is a 0-bit (left), `true` a 1-bit (right).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Code(Vec<bool>);

impl Code {
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.0.starts_with(&self.0)
    }

    fn with_bit(&self, bit: bool) -> Code {
        let mut bits = Vec::with_capacity(self.0.len() + 1);
        bits.extend_from_slice(&self.0);
        bits.push(bit);
        Code(bits)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// A character other than `0` or `1` in a written code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{0:?} is not a bit, expected '0' or '1'")]
pub struct InvalidBit(pub char);

impl TryFrom<&str> for Code {
    type Error = InvalidBit;

    fn try_from(bits: &str) -> Result<Self, Self::Error> {
        bits.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(InvalidBit(other)),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Code)
    }
}

/// Symbol to code, one entry per leaf of the tree it was derived from.
///
/// No code is a prefix of another, since symbols only live on leaves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncodingMap {
    codes: BTreeMap<char, Code>,
}

impl EncodingMap {
    /// Walks the tree, appending a 0-bit for every left turn and a 1-bit for every right
    /// turn.
    ///
    /// A tree that is a single leaf has no turns to take; its symbol gets the code `0`.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();
        match tree.root() {
            Node::Leaf { symbol, .. } => {
                codes.insert(*symbol, Code(vec![false]));
            }
            root => collect_codes(root, Code::default(), &mut codes),
        }
        Self { codes }
    }

    pub fn get(&self, symbol: char) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Symbols and their codes, in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &Code)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    /// Bit length of the encoded text described by `table`, without encoding it.
    ///
    /// Symbols of `table` that have no code are skipped. Saturates at `u64::MAX`.
    pub fn encoded_len(&self, table: &FrequencyTable) -> u64 {
        table
            .iter()
            .filter_map(|(symbol, count)| self.get(symbol).map(|code| (code.len() as u64).saturating_mul(count)))
            .fold(0, u64::saturating_add)
    }
}

fn collect_codes(node: &Node, prefix: Code, codes: &mut BTreeMap<char, Code>) {
    match node {
        Node::Leaf { symbol, .. } => {
            codes.insert(*symbol, prefix);
        }
        Node::Internal { left, right, .. } => {
            collect_codes(left, prefix.with_bit(false), codes);
            collect_codes(right, prefix.with_bit(true), codes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(bits: &str) -> Code {
        Code::try_from(bits).unwrap()
    }

    fn map_for(text: &str) -> EncodingMap {
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_text(text)).unwrap();
        EncodingMap::from_tree(&tree)
    }

    #[test]
    fn aabbbcc_codes() {
        let map = map_for("aabbbcc");
        assert_eq!(map.len(), 3);
        assert_eq!(map.get('b').map(Code::len), Some(1));
        assert_eq!(map.get('a').map(Code::len), Some(2));
        assert_eq!(map.get('c').map(Code::len), Some(2));
        assert_eq!(map.get('b'), Some(&code("0")));
        assert_eq!(map.get('a'), Some(&code("10")));
        assert_eq!(map.get('c'), Some(&code("11")));
    }

    #[test]
    fn single_symbol_gets_one_bit() {
        let map = map_for("aaaa");
        assert_eq!(map.get('a'), Some(&code("0")));
    }

    #[test]
    fn codes_are_prefix_free() {
        let map = map_for("the quick brown fox jumps over the lazy dog, then naps until noon");
        for (a, code_a) in map.iter() {
            assert!(!code_a.is_empty(), "{a:?} has an empty code");
            for (b, code_b) in map.iter() {
                if a != b {
                    assert!(!code_a.is_prefix_of(code_b), "{a:?}={code_a} is a prefix of {b:?}={code_b}");
                }
            }
        }
    }

    #[test]
    fn encoded_len_matches_codes() {
        let table = FrequencyTable::from_text("aabbbcc");
        let map = EncodingMap::from_tree(&HuffmanTree::from_frequencies(&table).unwrap());
        // b: 3 * 1 bit, a and c: 2 * 2 bits each
        assert_eq!(map.encoded_len(&table), 11);
    }

    #[test]
    fn code_display() {
        assert_eq!(code("0110").to_string(), "0110");
        assert!(code("01").is_prefix_of(&code("0110")));
        assert!(!code("10").is_prefix_of(&code("0110")));
    }

    #[test]
    fn written_codes_hold_only_bits() {
        assert_eq!(Code::try_from("0120"), Err(InvalidBit('2')));
        assert_eq!(Code::try_from("1 0"), Err(InvalidBit(' ')));
        assert_eq!(code("").len(), 0);
    }

    #[test]
    fn encoded_len_saturates() {
        let table = FrequencyTable::try_from_counts([('a', u64::MAX / 2), ('b', u64::MAX / 2), ('c', 1)]).unwrap();
        let map = EncodingMap::from_tree(&HuffmanTree::from_frequencies(&table).unwrap());
        assert_eq!(map.encoded_len(&table), u64::MAX);
    }
}
