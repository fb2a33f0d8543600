use core::fmt;
use std::time::Duration;

/// Size and timing summary of one compression.
#[derive(Clone, Debug, PartialEq)]
pub struct CompressionReport {
    pub original: u64,
    pub payload: u64,
    pub table: u64,
    pub elapsed: Duration,
}

impl CompressionReport {
    /// Everything that has to be kept to decompress: payload plus frequency table.
    pub fn compressed(&self) -> u64 {
        self.payload + self.table
    }

    pub fn bytes_saved(&self) -> i64 {
        self.original as i64 - self.compressed() as i64
    }

    /// Percentage of the original size saved. Negative when the output grew.
    pub fn reduction_percent(&self) -> f64 {
        if self.original == 0 {
            return 0.0;
        }
        self.bytes_saved() as f64 / self.original as f64 * 100.0
    }
}

impl fmt::Display for CompressionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "original: {} bytes\ncompressed: {} bytes ({} payload + {} table)\nreduction: {:.1}% ({:+} bytes)\nelapsed: {:.0?}",
            self.original,
            self.compressed(),
            self.payload,
            self.table,
            self.reduction_percent(),
            -self.bytes_saved(),
            self.elapsed,
        )
    }
}
