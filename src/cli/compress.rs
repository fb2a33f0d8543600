use anyhow::{Context, Result};
use voxell_timer::time_fn;

use crate::archive::Archive;
use crate::cli::report::CompressionReport;
use crate::cli::{CompressArgs, read_text};
use crate::compressor::Compressor;
use crate::huffman::HuffmanCoding;
use crate::storage::ByteStore;

pub fn compress(args: CompressArgs, store: &mut impl ByteStore) -> Result<()> {
    let input = read_text(&*store, &args.input)?;

    let (compressed, elapsed) = time_fn(|| HuffmanCoding.compress(&input));
    let compressed = compressed.with_context(|| format!("failed to compress {}", args.input.display()))?;

    let sizes = Archive::new(&mut *store).write(&args.output, args.table.as_deref(), &compressed)?;
    if_tracing! {
        tracing::info!(event = "compress_complete", input = %args.input.display(), output = %args.output.display(), table = %sizes.table_path.display(), elapsed_ms = %elapsed.as_millis(), "compress finished");
    }

    let report = CompressionReport {
        original: input.len() as u64,
        payload: sizes.payload,
        table: sizes.table,
        elapsed,
    };
    println!("{report}");
    Ok(())
}
