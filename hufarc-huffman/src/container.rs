//! On-disk container format.
//!
//! ```text
//! offset 0       2 bytes   symbol count N, big-endian (at most 256)
//! offset 2       N x 33    records: symbol byte + 32-byte code field
//! offset 2+33N   payload   packed code bits, MSB-first
//! last byte      1 byte    pad count (0-7)
//! ```
//!
//! # Code fields
//!
//! Each code is stored in a fixed 256-bit field: `255 - len` zero bits, a
//! single `1` marker bit, then the code itself. The first set bit of the
//! field is always the marker, so the code length and any leading zero bits
//! of the code survive the round trip without a separate length byte.
//!
//! ```text
//! code "001":  0000 ... 0000 1 001
//!              \_ 252 zeros _/ ^ \_/
//!                         marker  code
//! ```

use crate::code::{Code, CodeTable, MAX_CODE_LENGTH};
use crate::encoder::EncodedPayload;
use crate::frequency::NUM_SYMBOLS;
use crate::tree::HuffmanTree;
use hufarc_core::bitstream::{BitReader, BitWriter};
use hufarc_core::error::{HufArcError, Result};

/// Size of the symbol count field.
pub const SYMBOL_COUNT_LEN: usize = 2;

/// Bits in a sentinel-packed code field.
pub const CODE_FIELD_BITS: usize = 256;

/// Bytes in a sentinel-packed code field.
pub const CODE_FIELD_LEN: usize = CODE_FIELD_BITS / 8;

/// Bytes per header record (symbol + code field).
pub const RECORD_LEN: usize = 1 + CODE_FIELD_LEN;

/// Size of the trailing pad count.
pub const PAD_COUNT_LEN: usize = 1;

/// Header length for `symbol_count` records.
pub const fn header_len(symbol_count: usize) -> usize {
    SYMBOL_COUNT_LEN + symbol_count * RECORD_LEN
}

/// Pack `code` into a 256-bit sentinel field.
///
/// # Panics
///
/// Panics in debug builds if `code` is empty.
pub fn pack_code_field(code: &Code) -> [u8; CODE_FIELD_LEN] {
    debug_assert!(!code.is_empty(), "empty codes cannot be stored");

    let mut writer = BitWriter::with_capacity(CODE_FIELD_LEN);
    writer.write_zeros(MAX_CODE_LENGTH - code.len());
    writer.write_bit(true);
    for (value, count) in code.chunks() {
        writer.write_bits(value, count);
    }

    let (bytes, _) = writer.finish();
    let mut field = [0u8; CODE_FIELD_LEN];
    field.copy_from_slice(&bytes);
    field
}

/// Recover the code stored in a 256-bit sentinel field.
///
/// `offset` is the field's position in the container, used for errors.
pub fn unpack_code_field(field: &[u8; CODE_FIELD_LEN], offset: u64) -> Result<Code> {
    let Some(marker_byte) = field.iter().position(|&b| b != 0) else {
        return Err(HufArcError::malformed(
            offset,
            "code field has no marker bit",
        ));
    };
    let marker = marker_byte * 8 + field[marker_byte].leading_zeros() as usize;

    let len = CODE_FIELD_BITS - 1 - marker;
    if len == 0 {
        return Err(HufArcError::malformed(
            offset + marker_byte as u64,
            "code field holds an empty code",
        ));
    }

    let mut reader = BitReader::new(field);
    let mut code = Code::empty();
    for position in 0..CODE_FIELD_BITS {
        let bit = reader.read_bit()?;
        if position > marker {
            code.push(bit);
        }
    }
    Ok(code)
}

/// Serialize a code table and encoded payload into a container.
///
/// Records are written in ascending symbol order.
pub fn write_container(table: &CodeTable, payload: &EncodedPayload) -> Vec<u8> {
    let symbol_count = table.len();
    let mut out =
        Vec::with_capacity(header_len(symbol_count) + payload.bytes.len() + PAD_COUNT_LEN);

    out.extend_from_slice(&(symbol_count as u16).to_be_bytes());
    for (symbol, code) in table.iter() {
        out.push(symbol);
        out.extend_from_slice(&pack_code_field(code));
    }
    out.extend_from_slice(&payload.bytes);
    out.push(payload.pad_count);

    out
}

/// One header record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeRecord {
    /// Symbol the code belongs to.
    pub symbol: u8,
    /// Unpacked code.
    pub code: Code,
    /// Byte offset of the record in the container.
    pub offset: u64,
}

/// A parsed and validated container borrowing its payload.
#[derive(Debug, Clone)]
pub struct ContainerView<'a> {
    records: Vec<CodeRecord>,
    payload: &'a [u8],
    payload_offset: usize,
    pad_count: u8,
}

impl<'a> ContainerView<'a> {
    /// Parse the container layout and validate it against the data length.
    ///
    /// This checks every structural rule that can be checked without
    /// decoding the payload: the symbol count fits the file, each code field
    /// has a marker and a non-empty code, no symbol appears twice, the pad
    /// count is 0-7, and the payload is empty exactly when the table is.
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        if data.len() < SYMBOL_COUNT_LEN + PAD_COUNT_LEN {
            return Err(HufArcError::malformed(
                data.len() as u64,
                format!(
                    "container is {} bytes, shorter than the minimum of {}",
                    data.len(),
                    SYMBOL_COUNT_LEN + PAD_COUNT_LEN
                ),
            ));
        }

        let symbol_count = u16::from_be_bytes([data[0], data[1]]) as usize;
        if symbol_count > NUM_SYMBOLS {
            return Err(HufArcError::malformed(
                0,
                format!("symbol count {} exceeds {}", symbol_count, NUM_SYMBOLS),
            ));
        }

        let payload_offset = header_len(symbol_count);
        if data.len() < payload_offset + PAD_COUNT_LEN {
            return Err(HufArcError::malformed(
                data.len() as u64,
                format!(
                    "{} records need at least {} bytes, container has {}",
                    symbol_count,
                    payload_offset + PAD_COUNT_LEN,
                    data.len()
                ),
            ));
        }

        let mut seen = [false; NUM_SYMBOLS];
        let mut records = Vec::with_capacity(symbol_count);
        for chunk in data[SYMBOL_COUNT_LEN..payload_offset].chunks_exact(RECORD_LEN) {
            let offset = (SYMBOL_COUNT_LEN + records.len() * RECORD_LEN) as u64;
            let symbol = chunk[0];
            if seen[symbol as usize] {
                return Err(HufArcError::malformed(
                    offset,
                    format!("duplicate record for symbol {:#04x}", symbol),
                ));
            }
            seen[symbol as usize] = true;

            let mut field = [0u8; CODE_FIELD_LEN];
            field.copy_from_slice(&chunk[1..]);
            let code = unpack_code_field(&field, offset + 1)?;

            records.push(CodeRecord {
                symbol,
                code,
                offset,
            });
        }

        let pad_offset = data.len() - PAD_COUNT_LEN;
        let pad_count = data[pad_offset];
        let payload = &data[payload_offset..pad_offset];

        if pad_count > 7 || (payload.is_empty() && pad_count != 0) {
            return Err(HufArcError::corrupt_pad_count(pad_count));
        }
        if symbol_count == 0 && !payload.is_empty() {
            return Err(HufArcError::malformed(
                payload_offset as u64,
                "payload present but the code table is empty",
            ));
        }
        if symbol_count > 0 && payload.is_empty() {
            return Err(HufArcError::malformed(
                payload_offset as u64,
                "code table present but the payload is empty",
            ));
        }

        Ok(Self {
            records,
            payload,
            payload_offset,
            pad_count,
        })
    }

    /// Header records in file order.
    pub fn records(&self) -> &[CodeRecord] {
        &self.records
    }

    /// Number of header records.
    pub fn symbol_count(&self) -> usize {
        self.records.len()
    }

    /// Packed payload bytes (without the pad count).
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    /// Byte offset of the payload (equal to the header length).
    pub fn payload_offset(&self) -> usize {
        self.payload_offset
    }

    /// Number of padding bits in the last payload byte.
    pub fn pad_count(&self) -> u8 {
        self.pad_count
    }

    /// Number of meaningful payload bits.
    pub fn payload_bits(&self) -> u64 {
        self.payload.len() as u64 * 8 - self.pad_count as u64
    }

    /// Code table described by the header.
    pub fn code_table(&self) -> CodeTable {
        let mut table = CodeTable::new();
        for record in &self.records {
            table.insert(record.symbol, record.code);
        }
        table
    }

    /// Rebuild the decoding tree from the header records.
    ///
    /// Fails if two codes collide; the error points at the offending record.
    pub fn build_tree(&self) -> Result<HuffmanTree> {
        let mut tree = HuffmanTree::empty();
        for record in &self.records {
            tree.insert_code(record.symbol, &record.code)
                .map_err(|e| match e {
                    HufArcError::MalformedContainer { message, .. } => {
                        HufArcError::malformed(record.offset, message)
                    }
                    other => other,
                })?;
        }
        Ok(tree)
    }
}
