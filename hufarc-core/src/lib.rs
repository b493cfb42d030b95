//! # HufArc Core
//!
//! Core components for the HufArc Huffman compressor.
//!
//! This crate provides the building blocks shared by the codec and the
//! command-line front end:
//!
//! - [`bitstream`]: MSB-first bit I/O for variable-length codes
//! - [`fs`]: whole-file reads and all-or-nothing writes
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Front end                                           │
//! │     hufarc CLI                                          │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     Frequency table, tree, code table, container        │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream + files (this crate)                      │
//! │     BitReader/BitWriter, read_input/write_output        │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use hufarc_core::bitstream::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0b0010_1100, 8);
//! let (bytes, pad) = writer.finish();
//! assert_eq!(pad, 0);
//!
//! let mut reader = BitReader::new(&bytes);
//! assert!(!reader.read_bit().unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;
pub mod fs;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use error::{HufArcError, Result};
pub use fs::{InputData, read_input, write_output};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{BitReader, BitWriter};
    pub use crate::error::{HufArcError, Result};
    pub use crate::fs::{read_input, write_output};
}
