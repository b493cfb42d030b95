//! Huffman encoder (compression).

use crate::code::CodeTable;
use crate::config::HuffmanConfig;
use crate::container::write_container;
use crate::frequency::FrequencyTable;
use crate::tree::HuffmanTree;
use hufarc_core::bitstream::BitWriter;
use hufarc_core::error::{HufArcError, Result};

/// Packed payload bits plus padding information.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedPayload {
    /// Packed code bits, MSB-first, zero-padded to a whole byte.
    pub bytes: Vec<u8>,
    /// Number of padding bits in the last byte (0-7).
    pub pad_count: u8,
    /// Number of meaningful bits.
    pub bit_len: u64,
}

/// Encode `data` with the codes in `table`.
///
/// Every byte of `data` must have a code.
pub fn encode_payload(data: &[u8], table: &CodeTable) -> Result<EncodedPayload> {
    let estimate = data.len().div_ceil(2);
    let mut writer = BitWriter::with_capacity(estimate);

    for &byte in data {
        let code = table
            .get(byte)
            .ok_or_else(|| HufArcError::missing_code(byte))?;
        for (value, count) in code.chunks() {
            writer.write_bits(value, count);
        }
    }

    let bit_len = writer.bits_written();
    let (bytes, pad_count) = writer.finish();

    Ok(EncodedPayload {
        bytes,
        pad_count,
        bit_len,
    })
}

/// Huffman encoder producing complete containers.
#[derive(Debug)]
pub struct HuffmanEncoder {
    config: HuffmanConfig,
    /// Tree built by the last call to `encode`.
    tree: Option<HuffmanTree>,
    /// Code table built by the last call to `encode`.
    table: CodeTable,
}

impl HuffmanEncoder {
    /// Create a new encoder with the given configuration.
    pub fn new(config: HuffmanConfig) -> Self {
        Self {
            config,
            tree: None,
            table: CodeTable::new(),
        }
    }

    /// Compress `input` into a container.
    ///
    /// # Algorithm
    ///
    /// 1. Count byte frequencies
    /// 2. Build the Huffman tree by greedy merging
    /// 3. Derive the code table from the tree
    /// 4. Pack every input byte's code into the payload
    /// 5. Write the header, payload and pad count
    pub fn encode(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        if input.is_empty() && !self.config.allow_empty_input {
            return Err(HufArcError::EmptyInput);
        }

        let frequencies = FrequencyTable::count(input);
        self.tree = HuffmanTree::from_frequencies(&frequencies);
        self.table = match &self.tree {
            Some(tree) => CodeTable::from_tree(tree),
            None => CodeTable::new(),
        };

        let payload = encode_payload(input, &self.table)?;
        debug_assert_eq!(payload.bit_len, self.table.encoded_bits(&frequencies));

        Ok(write_container(&self.table, &payload))
    }

    /// Code table from the last call to `encode`.
    pub fn code_table(&self) -> &CodeTable {
        &self.table
    }

    /// Tree from the last call to `encode` (`None` for empty input).
    pub fn tree(&self) -> Option<&HuffmanTree> {
        self.tree.as_ref()
    }

    /// Get the configuration.
    pub fn config(&self) -> &HuffmanConfig {
        &self.config
    }
}

impl Default for HuffmanEncoder {
    fn default() -> Self {
        Self::new(HuffmanConfig::DEFAULT)
    }
}
