//! Huffman codes and code table generation.
//!
//! A [`Code`] is the bit string read off the path from the root to a leaf:
//! a left edge contributes `0`, a right edge `1`. Codes are stored
//! MSB-aligned in a fixed 256-bit buffer, which comfortably holds the longest
//! code a 256-leaf tree can produce (255 bits).

use crate::frequency::{FrequencyTable, NUM_SYMBOLS};
use crate::tree::{HuffmanTree, Node};
use std::fmt;

/// Maximum code length a tree over 256 symbols can produce.
pub const MAX_CODE_LENGTH: usize = 255;

/// Number of 32-bit words backing a code.
const CODE_WORDS: usize = 8;

/// A variable-length Huffman code.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Code {
    /// Bits, MSB-first: bit `i` is bit `31 - i % 32` of `words[i / 32]`.
    words: [u32; CODE_WORDS],
    /// Number of valid bits.
    len: u16,
}

impl Code {
    /// The zero-length code.
    pub const fn empty() -> Self {
        Self {
            words: [0; CODE_WORDS],
            len: 0,
        }
    }

    /// Build a code from a sequence of bits.
    ///
    /// # Panics
    ///
    /// Panics if more than [`MAX_CODE_LENGTH`] bits are supplied.
    pub fn from_bits(bits: impl IntoIterator<Item = bool>) -> Self {
        let mut code = Self::empty();
        for bit in bits {
            code.push(bit);
        }
        code
    }

    /// Parse a string of `0` and `1` characters.
    ///
    /// Returns `None` if the string holds any other character or is longer
    /// than [`MAX_CODE_LENGTH`].
    pub fn parse_bits(s: &str) -> Option<Self> {
        if s.len() > MAX_CODE_LENGTH {
            return None;
        }
        let mut code = Self::empty();
        for c in s.chars() {
            match c {
                '0' => code.push(false),
                '1' => code.push(true),
                _ => return None,
            }
        }
        Some(code)
    }

    /// Number of bits in the code.
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Whether the code has no bits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bit at `index`, counting from the root.
    #[inline]
    pub fn bit(&self, index: usize) -> bool {
        debug_assert!(index < self.len());
        (self.words[index / 32] >> (31 - index % 32)) & 1 != 0
    }

    /// Append a bit.
    ///
    /// # Panics
    ///
    /// Panics if the code already holds [`MAX_CODE_LENGTH`] bits.
    pub fn push(&mut self, bit: bool) {
        assert!(
            self.len() < MAX_CODE_LENGTH,
            "Huffman code cannot exceed {} bits",
            MAX_CODE_LENGTH
        );
        let index = self.len();
        if bit {
            self.words[index / 32] |= 1 << (31 - index % 32);
        }
        self.len += 1;
    }

    /// Copy of this code with one more bit appended.
    pub fn pushed(mut self, bit: bool) -> Self {
        self.push(bit);
        self
    }

    /// Iterate over the bits, root first.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len()).map(move |i| self.bit(i))
    }

    /// Split the code into `(value, bit_count)` chunks of at most 32 bits,
    /// right-aligned, ready for [`hufarc_core::BitWriter::write_bits`].
    pub fn chunks(&self) -> impl Iterator<Item = (u32, u8)> + '_ {
        let len = self.len();
        (0..len.div_ceil(32)).map(move |i| {
            let count = (len - i * 32).min(32);
            (self.words[i] >> (32 - count), count as u8)
        })
    }

    /// Whether `prefix` is a prefix of this code.
    pub fn starts_with(&self, prefix: &Code) -> bool {
        prefix.len() <= self.len() && (0..prefix.len()).all(|i| self.bit(i) == prefix.bit(i))
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Code(\"{}\")", self)
    }
}

/// Mapping from symbol to its Huffman code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; NUM_SYMBOLS],
}

impl CodeTable {
    /// Create a table with no codes.
    pub fn new() -> Self {
        Self {
            codes: [None; NUM_SYMBOLS],
        }
    }

    /// Assign a code to every leaf of `tree`.
    ///
    /// The walk uses an explicit stack, so very deep (skewed) trees are fine.
    /// A tree whose root is itself a leaf (one distinct symbol) gives that
    /// symbol the one-bit code `0`, since an empty code cannot be packed.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut table = Self::new();

        if let Node::Leaf { symbol, .. } = *tree.node(tree.root()) {
            table.insert(symbol, Code::empty().pushed(false));
            return table;
        }

        let mut stack = vec![(tree.root(), Code::empty())];
        while let Some((id, code)) = stack.pop() {
            match *tree.node(id) {
                Node::Leaf { symbol, .. } => table.insert(symbol, code),
                Node::Internal { left, right, .. } => {
                    if let Some(right) = right {
                        stack.push((right, code.pushed(true)));
                    }
                    if let Some(left) = left {
                        stack.push((left, code.pushed(false)));
                    }
                }
            }
        }

        table
    }

    /// Set the code for `symbol`, replacing any previous one.
    pub fn insert(&mut self, symbol: u8, code: Code) {
        self.codes[symbol as usize] = Some(code);
    }

    /// Code assigned to `symbol`.
    #[inline]
    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes[symbol as usize].as_ref()
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }

    /// Whether no symbol has a code.
    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(Option::is_none)
    }

    /// `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_ref().map(|c| (symbol as u8, c)))
    }

    /// Length of the longest code, or 0 for an empty table.
    pub fn max_length(&self) -> usize {
        self.iter().map(|(_, c)| c.len()).max().unwrap_or(0)
    }

    /// Check that no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Code> = self.iter().map(|(_, c)| c).collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !b.starts_with(a))
        })
    }

    /// Total payload bits needed to encode data with these frequencies.
    ///
    /// Symbols without a code contribute nothing.
    pub fn encoded_bits(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .iter()
            .filter_map(|(symbol, count)| self.get(symbol).map(|c| c.len() as u64 * count))
            .sum()
    }
}

impl Default for CodeTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> Code {
        Code::parse_bits(s).unwrap()
    }

    #[test]
    fn test_code_push_and_display() {
        let c = Code::empty().pushed(false).pushed(false).pushed(true);
        assert_eq!(c.len(), 3);
        assert_eq!(c.to_string(), "001");
        assert_eq!(format!("{:?}", c), "Code(\"001\")");
        assert_eq!(c, code("001"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Code::parse_bits("012").is_none());
        assert!(Code::parse_bits(&"0".repeat(256)).is_none());
        assert_eq!(Code::parse_bits("").unwrap(), Code::empty());
    }

    #[test]
    fn test_chunks() {
        let c = code("101");
        let chunks: Vec<_> = c.chunks().collect();
        assert_eq!(chunks, vec![(0b101, 3)]);

        let long = Code::from_bits((0..40).map(|i| i % 2 == 0));
        let chunks: Vec<_> = long.chunks().collect();
        assert_eq!(chunks, vec![(0xAAAA_AAAA, 32), (0xAA, 8)]);
    }

    #[test]
    fn test_max_length_code() {
        let c = Code::from_bits(std::iter::repeat_n(true, MAX_CODE_LENGTH));
        assert_eq!(c.len(), MAX_CODE_LENGTH);
        assert!(c.iter().all(|b| b));
        let total: usize = c.chunks().map(|(_, n)| n as usize).sum();
        assert_eq!(total, MAX_CODE_LENGTH);
    }

    #[test]
    #[should_panic(expected = "cannot exceed")]
    fn test_push_past_limit_panics() {
        let mut c = Code::from_bits(std::iter::repeat_n(false, MAX_CODE_LENGTH));
        c.push(true);
    }

    #[test]
    fn test_starts_with() {
        assert!(code("0110").starts_with(&code("01")));
        assert!(code("0110").starts_with(&code("0110")));
        assert!(!code("0110").starts_with(&code("1")));
        assert!(!code("01").starts_with(&code("011")));
    }

    #[test]
    fn test_table_from_tree_aabc() {
        let freqs = FrequencyTable::count(b"AABC");
        let tree = HuffmanTree::from_frequencies(&freqs).unwrap();
        let table = CodeTable::from_tree(&tree);

        assert_eq!(table.len(), 3);
        assert_eq!(table.get(b'A').unwrap().len(), 1);
        assert_eq!(table.get(b'B').unwrap().len(), 2);
        assert_eq!(table.get(b'C').unwrap().len(), 2);
        assert!(table.get(b'D').is_none());
        assert!(table.is_prefix_free());
        assert_eq!(table.encoded_bits(&freqs), 6);
    }

    #[test]
    fn test_single_symbol_gets_one_bit() {
        let freqs = FrequencyTable::count(b"zzzz");
        let tree = HuffmanTree::from_frequencies(&freqs).unwrap();
        let table = CodeTable::from_tree(&tree);

        assert_eq!(table.len(), 1);
        assert_eq!(*table.get(b'z').unwrap(), code("0"));
    }

    #[test]
    fn test_all_symbols_prefix_free() {
        let data: Vec<u8> = (0..=255u8)
            .flat_map(|b| std::iter::repeat_n(b, b as usize % 7 + 1))
            .collect();
        let freqs = FrequencyTable::count(&data);
        let tree = HuffmanTree::from_frequencies(&freqs).unwrap();
        let table = CodeTable::from_tree(&tree);

        assert_eq!(table.len(), 256);
        assert!(table.is_prefix_free());
    }

    #[test]
    fn test_not_prefix_free_detected() {
        let mut table = CodeTable::new();
        table.insert(1, code("0"));
        table.insert(2, code("01"));
        assert!(!table.is_prefix_free());
    }

    #[test]
    fn test_skewed_tree_codes() {
        // Fibonacci-like counts give a maximally deep tree
        let mut data = Vec::new();
        let (mut a, mut b) = (1usize, 1usize);
        for symbol in 0..20u8 {
            data.extend(std::iter::repeat_n(symbol, a));
            (a, b) = (b, a + b);
        }
        let freqs = FrequencyTable::count(&data);
        let tree = HuffmanTree::from_frequencies(&freqs).unwrap();
        let table = CodeTable::from_tree(&tree);

        assert_eq!(table.max_length(), 19);
        assert!(table.is_prefix_free());
    }
}
