use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Why a list of symbol counts is not a valid frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("frequency table has no symbols")]
    Empty,

    #[error("symbol {0:?} has a count of zero")]
    ZeroCount(char),

    #[error("symbol {0:?} appears more than once")]
    DuplicateSymbol(char),

    #[error("symbol counts add up to more than {}", u64::MAX)]
    TotalOverflow,
}

/// Occurrence count of every symbol in a text.
///
/// Kept ordered by symbol. The tree builder consumes symbols in this order, so the same
/// table always rebuilds the same tree, in this process or any other.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<SymbolCount>")]
pub struct FrequencyTable {
    counts: BTreeMap<char, u64>,
}

/// One entry of a persisted frequency table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolCount {
    pub symbol: char,
    pub count: u64,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every symbol produced by `symbols`.
    pub fn from_symbols(symbols: impl IntoIterator<Item = char>) -> Self {
        let mut counts = BTreeMap::new();
        for symbol in symbols {
            *counts.entry(symbol).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn from_text(text: &str) -> Self {
        Self::from_symbols(text.chars())
    }

    /// Builds a table from explicit counts, as read back from storage.
    ///
    /// # Errors
    ///
    /// Rejects an empty list, zero counts, symbols listed twice, and counts whose sum does
    /// not fit in a `u64`. Every node weight of a tree is bounded by that sum.
    pub fn try_from_counts(entries: impl IntoIterator<Item = (char, u64)>) -> Result<Self, TableError> {
        let mut counts = BTreeMap::new();
        let mut total = 0u64;
        for (symbol, count) in entries {
            if count == 0 {
                return Err(TableError::ZeroCount(symbol));
            }
            total = total.checked_add(count).ok_or(TableError::TotalOverflow)?;
            match counts.entry(symbol) {
                Entry::Occupied(_) => return Err(TableError::DuplicateSymbol(symbol)),
                Entry::Vacant(slot) => {
                    slot.insert(count);
                }
            }
        }

        if counts.is_empty() {
            return Err(TableError::Empty);
        }
        Ok(Self { counts })
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn get(&self, symbol: char) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Sum of all counts, which is the length of the counted text in symbols.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Symbols and their counts, in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }
}

impl TryFrom<Vec<SymbolCount>> for FrequencyTable {
    type Error = TableError;

    fn try_from(entries: Vec<SymbolCount>) -> Result<Self, Self::Error> {
        Self::try_from_counts(entries.into_iter().map(|entry| (entry.symbol, entry.count)))
    }
}

impl Serialize for FrequencyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(|(symbol, count)| SymbolCount { symbol, count }))
    }
}
