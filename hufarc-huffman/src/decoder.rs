//! Huffman decoder (decompression).

use crate::config::HuffmanConfig;
use crate::container::ContainerView;
use crate::tree::{HuffmanTree, Node};
use hufarc_core::bitstream::BitReader;
use hufarc_core::error::{HufArcError, Result};

/// Decode the payload of `view` by walking `tree`.
///
/// Each meaningful payload bit moves a cursor left (`0`) or right (`1`);
/// reaching a leaf emits its symbol and sends the cursor back to the root.
/// Trailing pad bits are never read.
///
/// # Errors
///
/// - `InvalidHuffmanCode` if a bit leads to a child that does not exist
/// - `MalformedContainer` if the payload ends partway through a code
/// - `OutputLimitExceeded` if more than `limit` bytes would be produced
pub fn decode_payload(
    view: &ContainerView<'_>,
    tree: &HuffmanTree,
    limit: Option<usize>,
) -> Result<Vec<u8>> {
    let payload = view.payload();
    let mut reader = BitReader::with_bit_len(payload, view.payload_bits());

    // At least one bit per output byte, so the payload size bounds a useful guess
    let estimate = (payload.len() * 2).min(limit.unwrap_or(usize::MAX));
    let mut output = Vec::with_capacity(estimate);

    let root = tree.root();
    let mut current = root;

    while !reader.is_empty() {
        let position = reader.bit_position();
        let bit = reader.read_bit()?;

        current = tree
            .child(current, bit)
            .ok_or_else(|| HufArcError::invalid_huffman(position))?;

        if let Node::Leaf { symbol, .. } = *tree.node(current) {
            match limit {
                Some(limit) if output.len() >= limit => {
                    return Err(HufArcError::output_limit(limit));
                }
                _ => {}
            }
            output.push(symbol);
            current = root;
        }
    }

    if current != root {
        return Err(HufArcError::malformed(
            (view.payload_offset() + payload.len()) as u64,
            "payload ends inside a code",
        ));
    }

    Ok(output)
}

/// Huffman decoder reading complete containers.
#[derive(Debug)]
pub struct HuffmanDecoder {
    config: HuffmanConfig,
    /// Number of header records in the last decoded container.
    symbol_count: usize,
}

impl HuffmanDecoder {
    /// Create a new decoder with the given configuration.
    pub fn new(config: HuffmanConfig) -> Self {
        Self {
            config,
            symbol_count: 0,
        }
    }

    /// Decompress a container.
    ///
    /// # Algorithm
    ///
    /// 1. Parse and validate the header, payload bounds and pad count
    /// 2. Rebuild the tree from the stored codes
    /// 3. Walk the tree over the meaningful payload bits
    pub fn decode(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        let view = ContainerView::parse(data)?;
        let tree = view.build_tree()?;
        self.symbol_count = view.symbol_count();

        decode_payload(&view, &tree, self.config.max_output_size)
    }

    /// Header record count of the last container passed to `decode`.
    pub fn symbol_count(&self) -> usize {
        self.symbol_count
    }

    /// Get the configuration.
    pub fn config(&self) -> &HuffmanConfig {
        &self.config
    }
}

impl Default for HuffmanDecoder {
    fn default() -> Self {
        Self::new(HuffmanConfig::DEFAULT)
    }
}
