//! # HufArc Huffman
//!
//! Pure Rust byte-oriented Huffman compression.
//!
//! The compressor counts how often each of the 256 byte values occurs, builds
//! an optimal prefix code with the classic greedy merge, and stores the code
//! table together with the packed payload in one container. The decompressor
//! rebuilds the exact same tree from the stored table and walks it bit by bit.
//!
//! ## Features
//!
//! - **Pure Rust**: no C dependencies
//! - **Exact round trip** for any input, including empty input and inputs with
//!   a single distinct byte
//! - **Deterministic**: the same input always produces the same container
//! - **Strict decoding**: corrupted or mismatched containers are reported,
//!   never silently truncated
//!
//! ## Container Format
//!
//! | Field        | Size     | Contents                                    |
//! |--------------|----------|---------------------------------------------|
//! | symbol count | 2        | N, big-endian                               |
//! | records      | N x 33   | symbol byte + 256-bit sentinel code field   |
//! | payload      | variable | code bits, MSB-first, zero-padded           |
//! | pad count    | 1        | padding bits in the last payload byte (0-7) |
//!
//! See [`container`] for the sentinel field layout.
//!
//! ## Example
//!
//! ```rust
//! use hufarc_huffman::{compress, decompress};
//!
//! let original = b"AABC";
//! let compressed = compress(original).unwrap();
//!
//! // 3 header records, 1 payload byte, 1 pad count byte
//! assert_eq!(compressed.len(), 2 + 3 * 33 + 1 + 1);
//!
//! let decompressed = decompress(&compressed).unwrap();
//! assert_eq!(decompressed, original);
//! ```
//!
//! ## Files
//!
//! ```no_run
//! use hufarc_huffman::{compress_file, decompress_file};
//!
//! let report = compress_file("notes.txt", "notes.txt.huf").unwrap();
//! println!("saved {:.1}%", report.space_savings());
//! decompress_file("notes.txt.huf", "notes.txt").unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod batch;
pub mod code;
pub mod config;
pub mod container;
pub mod decoder;
pub mod encoder;
pub mod file;
pub mod frequency;
pub mod tree;

pub use batch::{
    FileJob, compress_files, compress_files_with_progress, decompress_files,
    decompress_files_with_progress, find_duplicate_output,
};
pub use code::{Code, CodeTable, MAX_CODE_LENGTH};
pub use config::HuffmanConfig;
pub use container::{CodeRecord, ContainerView};
pub use decoder::HuffmanDecoder;
pub use encoder::{EncodedPayload, HuffmanEncoder};
pub use file::{
    FileReport, compress_file, compress_file_with_config, decompress_file,
    decompress_file_with_config,
};
pub use frequency::FrequencyTable;
pub use hufarc_core::error::{HufArcError, Result};
pub use tree::{HuffmanTree, Node, NodeId};

/// Compress `data` with the default configuration.
///
/// # Example
///
/// ```rust
/// use hufarc_huffman::compress;
///
/// let compressed = compress(b"").unwrap();
/// assert_eq!(compressed, vec![0x00, 0x00, 0x00]);
/// ```
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    compress_with_config(data, &HuffmanConfig::DEFAULT)
}

/// Compress `data` with the given configuration.
pub fn compress_with_config(data: &[u8], config: &HuffmanConfig) -> Result<Vec<u8>> {
    HuffmanEncoder::new(*config).encode(data)
}

/// Decompress a container with the default configuration.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decompress_with_config(data, &HuffmanConfig::DEFAULT)
}

/// Decompress a container with the given configuration.
///
/// # Example
///
/// ```rust
/// use hufarc_huffman::{HuffmanConfig, compress, decompress_with_config};
///
/// let compressed = compress(&[0u8; 64]).unwrap();
/// let config = HuffmanConfig::new().with_max_output_size(Some(16));
/// assert!(decompress_with_config(&compressed, &config).is_err());
/// ```
pub fn decompress_with_config(data: &[u8], config: &HuffmanConfig) -> Result<Vec<u8>> {
    HuffmanDecoder::new(*config).decode(data)
}

/// Summary of a container's header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerInfo {
    /// Total container size in bytes.
    pub total_len: usize,
    /// Header size in bytes (symbol count plus records).
    pub header_len: usize,
    /// Payload size in bytes (excluding the pad count).
    pub payload_len: usize,
    /// Padding bits in the last payload byte.
    pub pad_count: u8,
    /// Meaningful payload bits.
    pub payload_bits: u64,
    /// `(symbol, code)` pairs in header order.
    pub codes: Vec<(u8, Code)>,
}

impl ContainerInfo {
    /// Number of distinct symbols.
    pub fn symbol_count(&self) -> usize {
        self.codes.len()
    }

    /// Shortest and longest code lengths, if there are any codes.
    pub fn code_length_range(&self) -> Option<(usize, usize)> {
        let lengths = self.codes.iter().map(|(_, c)| c.len());
        Some((lengths.clone().min()?, lengths.max()?))
    }
}

/// Read a container's header without decoding its payload.
///
/// The header is fully validated, including that the stored codes form a
/// consistent prefix code.
pub fn inspect(data: &[u8]) -> Result<ContainerInfo> {
    let view = ContainerView::parse(data)?;
    view.build_tree()?;

    Ok(ContainerInfo {
        total_len: data.len(),
        header_len: view.payload_offset(),
        payload_len: view.payload().len(),
        pad_count: view.pad_count(),
        payload_bits: view.payload_bits(),
        codes: view.records().iter().map(|r| (r.symbol, r.code)).collect(),
    })
}
