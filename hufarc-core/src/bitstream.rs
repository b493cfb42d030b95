//! Bit-level I/O for Huffman payloads and header fields.
//!
//! This module provides [`BitWriter`] and [`BitReader`] for packing and
//! unpacking variable-length codes.
//!
//! # Bit Ordering
//!
//! HufArc uses MSB-first (Most Significant Bit first) ordering: the first bit
//! written lands in bit 7 of the first byte. A partially filled final byte is
//! padded with zero bits on the low-order side, and the writer reports how
//! many bits of padding it added.
//!
//! # Example
//!
//! ```
//! use hufarc_core::bitstream::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0b101, 3);
//! writer.write_bits(0b1100, 4);
//! let (bytes, pad) = writer.finish();
//! assert_eq!(bytes, vec![0b1011_1000]);
//! assert_eq!(pad, 1);
//!
//! let mut reader = BitReader::with_bit_len(&bytes, 7);
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1100);
//! assert!(reader.is_empty());
//! ```

use crate::error::{HufArcError, Result};

/// MSB-first bit writer collecting into an in-memory buffer.
#[derive(Debug, Default)]
pub struct BitWriter {
    /// Output bytes.
    output: Vec<u8>,
    /// Bit buffer (MSB-first, right-aligned).
    buffer: u64,
    /// Number of bits in buffer (always below 8 between calls).
    bits_in_buffer: u8,
    /// Total bits written.
    total_bits_written: u64,
}

impl BitWriter {
    /// Create a new, empty `BitWriter`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `BitWriter` with room for `bytes` output bytes.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            output: Vec::with_capacity(bytes),
            ..Self::default()
        }
    }

    /// Get the total number of bits written so far.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Number of bits waiting for a full byte.
    pub fn pending_bits(&self) -> u8 {
        self.bits_in_buffer
    }

    /// Flush complete bytes from the buffer to the output.
    #[inline]
    fn flush_bytes(&mut self) {
        while self.bits_in_buffer >= 8 {
            let byte = (self.buffer >> (self.bits_in_buffer - 8)) as u8;
            self.output.push(byte);
            self.bits_in_buffer -= 8;
        }
        self.buffer &= (1u64 << self.bits_in_buffer).wrapping_sub(1);
    }

    /// Write up to 32 bits, most significant bit first.
    ///
    /// # Arguments
    ///
    /// * `value` - The bits to write, right-aligned
    /// * `count` - Number of bits to write (0-32)
    #[inline]
    pub fn write_bits(&mut self, value: u32, count: u8) {
        debug_assert!(count <= 32, "Cannot write more than 32 bits at once");

        if count == 0 {
            return;
        }

        let mask = if count == 32 {
            u32::MAX
        } else {
            (1u32 << count).wrapping_sub(1)
        };

        self.buffer = (self.buffer << count) | (value & mask) as u64;
        self.bits_in_buffer += count;
        self.total_bits_written += count as u64;

        self.flush_bytes();
    }

    /// Write a single bit.
    #[inline(always)]
    pub fn write_bit(&mut self, bit: bool) {
        self.buffer = (self.buffer << 1) | bit as u64;
        self.bits_in_buffer += 1;
        self.total_bits_written += 1;

        if self.bits_in_buffer == 8 {
            self.flush_bytes();
        }
    }

    /// Write `count` zero bits.
    pub fn write_zeros(&mut self, mut count: usize) {
        while count > 0 {
            let n = count.min(32);
            self.write_bits(0, n as u8);
            count -= n;
        }
    }

    /// Pad the final partial byte with zeros and return the output.
    ///
    /// # Returns
    ///
    /// The packed bytes and the number of padding bits added (0-7).
    pub fn finish(mut self) -> (Vec<u8>, u8) {
        let mut pad = 0;
        if self.bits_in_buffer > 0 {
            pad = 8 - self.bits_in_buffer;
            self.buffer <<= pad;
            self.output.push(self.buffer as u8);
        }
        (self.output, pad)
    }
}

/// MSB-first bit reader over a byte slice.
///
/// The reader can be limited to fewer bits than the slice holds, which is how
/// trailing pad bits are excluded from decoding.
#[derive(Debug)]
pub struct BitReader<'a> {
    /// Input data.
    data: &'a [u8],
    /// Number of readable bits.
    bit_len: u64,
    /// Current bit position.
    position: u64,
}

impl<'a> BitReader<'a> {
    /// Create a reader over every bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_bit_len(data, data.len() as u64 * 8)
    }

    /// Create a reader over the first `bit_len` bits of `data`.
    ///
    /// `bit_len` is clamped to the bits actually present.
    pub fn with_bit_len(data: &'a [u8], bit_len: u64) -> Self {
        Self {
            data,
            bit_len: bit_len.min(data.len() as u64 * 8),
            position: 0,
        }
    }

    /// Get the current bit position (for error reporting).
    pub fn bit_position(&self) -> u64 {
        self.position
    }

    /// Number of bits left to read.
    pub fn remaining_bits(&self) -> u64 {
        self.bit_len - self.position
    }

    /// Check if every readable bit has been consumed.
    pub fn is_empty(&self) -> bool {
        self.position >= self.bit_len
    }

    /// Read a single bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.position >= self.bit_len {
            return Err(HufArcError::unexpected_eof(1));
        }

        let byte = self.data[(self.position / 8) as usize];
        let shift = 7 - (self.position % 8) as u8;
        self.position += 1;

        Ok((byte >> shift) & 1 != 0)
    }

    /// Read up to 32 bits, most significant bit first.
    ///
    /// # Returns
    ///
    /// The bits read, right-aligned in a `u32`.
    pub fn read_bits(&mut self, count: u8) -> Result<u32> {
        debug_assert!(count <= 32, "Cannot read more than 32 bits at once");

        if (count as u64) > self.remaining_bits() {
            return Err(HufArcError::unexpected_eof(
                (count as u64 - self.remaining_bits()) as usize,
            ));
        }

        let mut value = 0u32;
        for _ in 0..count {
            value = (value << 1) | self.read_bit()? as u32;
        }
        Ok(value)
    }
}
