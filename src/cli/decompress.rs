use std::io::{self, Write};

use anyhow::{Context, Result};
use voxell_timer::time_fn;

use crate::archive::Archive;
use crate::cli::{CliError, DecompressArgs};
use crate::compressor::Compressor;
use crate::huffman::HuffmanCoding;
use crate::storage::ByteStore;

pub fn decompress(args: DecompressArgs, store: &mut impl ByteStore) -> Result<()> {
    let compressed = Archive::new(&mut *store).read(&args.input, args.table.as_deref())?;

    let (text, elapsed) = time_fn(|| HuffmanCoding.decompress(&compressed));
    let text = text.with_context(|| format!("failed to decompress {}", args.input.display()))?;

    match &args.output {
        Some(output) => {
            store.write_bytes(output, text.as_bytes()).map_err(|source| CliError::Write {
                path: output.clone(),
                source,
            })?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes()).context("failed to write to stdout")?;
            stdout.flush().context("failed to write to stdout")?;
        }
    }

    if_tracing! {{
        tracing::info!(event = "decompress_complete", input = %args.input.display(), elapsed_ms = %elapsed.as_millis(), output_len = text.len(), "decompress finished");
    }}
    eprintln!("elapsed: {:.0?}", elapsed);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;
    use crate::cli::CompressArgs;
    use crate::cli::compress::compress;
    use crate::storage::MemoryStore;

    fn compressed_store(text: &str) -> MemoryStore {
        let mut store = MemoryStore::default();
        store.files.insert(PathBuf::from("in.txt"), text.as_bytes().to_vec());
        let args = CompressArgs {
            input: PathBuf::from("in.txt"),
            output: PathBuf::from("packed.huff"),
            table: None,
        };
        compress(args, &mut store).unwrap();
        store
    }

    #[test]
    fn restores_the_input() {
        let text = "she sells sea shells\r\nby the sea shore\n";
        let mut store = compressed_store(text);
        let args = DecompressArgs {
            input: PathBuf::from("packed.huff"),
            output: Some(PathBuf::from("out.txt")),
            table: None,
        };
        decompress(args, &mut store).unwrap();
        assert_eq!(store.files[Path::new("out.txt")], text.as_bytes());
    }

    #[test]
    fn missing_table_fails() {
        let mut store = compressed_store("abc");
        store.files.remove(Path::new("packed.freq.json"));
        let args = DecompressArgs {
            input: PathBuf::from("packed.huff"),
            output: Some(PathBuf::from("out.txt")),
            table: None,
        };
        assert!(decompress(args, &mut store).is_err());
        assert!(!store.files.contains_key(Path::new("out.txt")));
    }

    #[test]
    fn corrupted_payload_fails() {
        let mut store = compressed_store("the quick brown fox");
        if let Some(payload) = store.files.get_mut(Path::new("packed.huff")) {
            payload[0] = 12;
        }
        let args = DecompressArgs {
            input: PathBuf::from("packed.huff"),
            output: Some(PathBuf::from("out.txt")),
            table: None,
        };
        assert!(decompress(args, &mut store).is_err());
    }
}
