//! File-level compression and decompression.
//!
//! Each call is one self-contained session: the whole input is read, the
//! container (or original data) is built in memory, and the result replaces
//! the output path in a single step. An error anywhere leaves the output
//! path untouched.

use crate::config::HuffmanConfig;
use crate::decoder::HuffmanDecoder;
use crate::encoder::HuffmanEncoder;
use hufarc_core::prelude::*;
use std::path::{Path, PathBuf};

/// Outcome of a successful file operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// Path that was read.
    pub input: PathBuf,
    /// Path that was written.
    pub output: PathBuf,
    /// Bytes read.
    pub input_size: u64,
    /// Bytes written.
    pub output_size: u64,
    /// Number of distinct symbols in the code table.
    pub symbol_count: usize,
}

impl FileReport {
    /// Output size as a fraction of input size (0.0 for empty input).
    pub fn ratio(&self) -> f64 {
        if self.input_size == 0 {
            return 0.0;
        }
        self.output_size as f64 / self.input_size as f64
    }

    /// Percentage of the input saved (negative when the output grew).
    pub fn space_savings(&self) -> f64 {
        if self.input_size == 0 {
            return 0.0;
        }
        (1.0 - self.ratio()) * 100.0
    }
}

/// Compress `input` into a container at `output`.
pub fn compress_file(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<FileReport> {
    compress_file_with_config(input, output, &HuffmanConfig::DEFAULT)
}

/// Compress `input` into a container at `output` with the given configuration.
pub fn compress_file_with_config(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &HuffmanConfig,
) -> Result<FileReport> {
    let (input, output) = (input.as_ref(), output.as_ref());

    let data = read_input(input)?;
    let mut encoder = HuffmanEncoder::new(*config);
    let compressed = encoder.encode(&data)?;
    write_output(output, &compressed)?;

    Ok(FileReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        input_size: data.len() as u64,
        output_size: compressed.len() as u64,
        symbol_count: encoder.code_table().len(),
    })
}

/// Restore the original bytes of the container at `input` into `output`.
pub fn decompress_file(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<FileReport> {
    decompress_file_with_config(input, output, &HuffmanConfig::DEFAULT)
}

/// Restore the container at `input` into `output` with the given configuration.
pub fn decompress_file_with_config(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &HuffmanConfig,
) -> Result<FileReport> {
    let (input, output) = (input.as_ref(), output.as_ref());

    let data = read_input(input)?;
    let mut decoder = HuffmanDecoder::new(*config);
    let restored = decoder.decode(&data)?;
    write_output(output, &restored)?;

    Ok(FileReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        input_size: data.len() as u64,
        output_size: restored.len() as u64,
        symbol_count: decoder.symbol_count(),
    })
}
