//! cli component of huffpack.
//!
//! lines starting with `> ` denote valid invocations. `$exename` stands for the executable
//! name, `<description>` denotes a required argument and `[description]` an optional one.
//!
//! # Compression
//!
//! > `$exename compress <input text> <output path> [--table <path>]`
//!
//! reads the input as UTF-8 text, writes the framed bit-stream to the output path and the
//! frequency table to `{output stem}.freq.json` next to it (or to `--table`). both files are
//! needed to decompress. afterwards the original size, the compressed size (payload plus
//! table), the reduction and the elapsed time are printed.
//!
//! # Decompression
//!
//! > `$exename decompress <compressed path> [output path] [--table <path>]`
//!
//! looks for the frequency table in the same place compression put it, unless `--table` says
//! otherwise. without an output path the text is printed to stdout; the timing report goes to
//! stderr so it does not mix with the text.
//!
//! # Testing
//!
//! > `$exename test <input text>`
//!
//! compresses and decompresses the input in memory and checks that the text survived.
//!
//! # Codes
//!
//! > `$exename codes <input text> [--json]`
//!
//! prints the code every symbol of the input gets, shortest codes first.
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::string::FromUtf8Error;
use thiserror::Error;

use crate::storage::ByteStore;

pub mod codes;
pub mod compress;
pub mod decompress;
pub mod report;

/// Error types for CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read {}: {source}", .path.display())]
    Read { path: PathBuf, source: std::io::Error },

    #[error("cannot write {}: {source}", .path.display())]
    Write { path: PathBuf, source: std::io::Error },

    #[error("{} is not valid UTF-8 text: {source}", .path.display())]
    InvalidUtf8 { path: PathBuf, source: FromUtf8Error },

    #[error("roundtrip of {} did not reproduce the input", .0.display())]
    RoundTripMismatch(PathBuf),
}

/// CLI arguments for huffpack
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Supported commands for huffpack
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compress a text file
    #[command(alias = "c")]
    Compress(CompressArgs),

    /// Decompress a file written by `compress`
    #[command(alias = "d")]
    Decompress(DecompressArgs),

    /// Test compression/decompression roundtrip
    Test(TestArgs),

    /// Print the code assigned to each symbol of a text file
    Codes(CodesArgs),
}

/// Arguments specific to the compress command
#[derive(Args, Debug)]
pub struct CompressArgs {
    /// Path to the input text file
    pub input: PathBuf,

    /// Path for the compressed output file
    pub output: PathBuf,

    /// Where to write the frequency table instead of `{output stem}.freq.json`
    #[arg(long)]
    pub table: Option<PathBuf>,
}

/// Arguments specific to the decompress command
#[derive(Args, Debug)]
pub struct DecompressArgs {
    /// Path to the compressed file
    pub input: PathBuf,

    /// Path for the decompressed text. Printed to stdout if omitted
    pub output: Option<PathBuf>,

    /// Where to read the frequency table from instead of `{input stem}.freq.json`
    #[arg(long)]
    pub table: Option<PathBuf>,
}

/// Arguments specific to the test command
#[derive(Args, Debug)]
pub struct TestArgs {
    /// Path to the input text file
    pub input: PathBuf,
}

/// Arguments specific to the codes command
#[derive(Args, Debug)]
pub struct CodesArgs {
    /// Path to the input text file
    pub input: PathBuf,

    /// Print the table as JSON
    #[arg(long)]
    pub json: bool,
}

/// Runs the parsed command against `store`.
pub fn run(cli: Cli, store: &mut impl ByteStore) -> anyhow::Result<()> {
    match cli.command {
        Command::Compress(args) => compress::compress(args, store),
        Command::Decompress(args) => decompress::decompress(args, store),
        Command::Test(args) => test::test(args, store),
        Command::Codes(args) => codes::codes(args, store),
    }
}

/// Reads `path` as UTF-8 text.
pub fn read_text(store: &impl ByteStore, path: &Path) -> Result<String, CliError> {
    let bytes = store.read_bytes(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|source| CliError::InvalidUtf8 {
        path: path.to_path_buf(),
        source,
    })
}
