use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::{CodesArgs, read_text};
use crate::huffman::{EncodingMap, FrequencyTable, HuffmanTree};
use crate::storage::ByteStore;

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct CodeRow {
    pub symbol: char,
    pub count: u64,
    pub code: String,
}

/// One row per symbol of `text`, shortest code first, then by symbol.
pub fn code_rows(text: &str) -> Result<Vec<CodeRow>> {
    let table = FrequencyTable::from_text(text);
    let tree = HuffmanTree::from_frequencies(&table)?;
    let map = EncodingMap::from_tree(&tree);

    let mut rows: Vec<CodeRow> = table
        .iter()
        .filter_map(|(symbol, count)| {
            map.get(symbol).map(|code| CodeRow {
                symbol,
                count,
                code: code.to_string(),
            })
        })
        .collect();
    rows.sort_by(|a, b| a.code.len().cmp(&b.code.len()).then(a.symbol.cmp(&b.symbol)));
    Ok(rows)
}

pub fn codes(args: CodesArgs, store: &mut impl ByteStore) -> Result<()> {
    let input = read_text(&*store, &args.input)?;
    let rows = code_rows(&input).with_context(|| format!("no codes for {}", args.input.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for row in &rows {
            println!("{:>10} {:>8} {}", format!("{:?}", row.symbol), row.count, row.code);
        }
    }
    Ok(())
}
