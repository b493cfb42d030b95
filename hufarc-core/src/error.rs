//! Error types for HufArc operations.
//!
//! This module provides a single error type covering every failure a
//! compression or decompression session can hit: I/O errors, container
//! format violations, and payload decoding errors.

use std::io;
use thiserror::Error;

/// The main error type for HufArc operations.
#[derive(Debug, Error)]
pub enum HufArcError {
    /// I/O error from the underlying file or reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Zero-length input was rejected by the active configuration.
    #[error("Empty input: nothing to encode")]
    EmptyInput,

    /// The container header or payload is structurally invalid.
    #[error("Malformed container at offset {offset}: {message}")]
    MalformedContainer {
        /// Byte offset where the problem was detected.
        offset: u64,
        /// Description of the problem.
        message: String,
    },

    /// Decoding walked into a branch that does not exist in the code tree.
    #[error("Invalid Huffman code at bit position {bit_position}")]
    InvalidHuffmanCode {
        /// Payload bit position where the walk failed.
        bit_position: u64,
    },

    /// The trailing pad-count byte is out of range.
    #[error("Corrupt pad count: {pad_count} (must be 0-7)")]
    CorruptPadCount {
        /// The pad count found in the container.
        pad_count: u8,
    },

    /// The encoder was asked to encode a symbol that has no code.
    #[error("No Huffman code for symbol {symbol:#04x}")]
    MissingCode {
        /// The symbol without a code.
        symbol: u8,
    },

    /// Decoded output grew past the configured limit.
    #[error("Decoded output exceeds limit of {limit} bytes")]
    OutputLimitExceeded {
        /// Maximum allowed output size.
        limit: usize,
    },

    /// Unexpected end of bit data.
    #[error("Unexpected end of data: expected {expected} more bits")]
    UnexpectedEof {
        /// Number of bits that were expected but not available.
        expected: usize,
    },
}

/// Result type alias for HufArc operations.
pub type Result<T> = std::result::Result<T, HufArcError>;

impl HufArcError {
    /// Create a malformed container error.
    pub fn malformed(offset: u64, message: impl Into<String>) -> Self {
        Self::MalformedContainer {
            offset,
            message: message.into(),
        }
    }

    /// Create an invalid Huffman code error.
    pub fn invalid_huffman(bit_position: u64) -> Self {
        Self::InvalidHuffmanCode { bit_position }
    }

    /// Create a corrupt pad count error.
    pub fn corrupt_pad_count(pad_count: u8) -> Self {
        Self::CorruptPadCount { pad_count }
    }

    /// Create a missing code error.
    pub fn missing_code(symbol: u8) -> Self {
        Self::MissingCode { symbol }
    }

    /// Create an output limit error.
    pub fn output_limit(limit: usize) -> Self {
        Self::OutputLimitExceeded { limit }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(expected: usize) -> Self {
        Self::UnexpectedEof { expected }
    }

    /// Whether this error means the container itself is damaged or mismatched.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::MalformedContainer { .. }
                | Self::InvalidHuffmanCode { .. }
                | Self::CorruptPadCount { .. }
                | Self::UnexpectedEof { .. }
        )
    }
}
