//! Info command implementation.

use crate::utils::display_symbol;
use hufarc_core::fs::read_input;
use hufarc_huffman::{ContainerInfo, inspect};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// JSON serializable code table row.
#[derive(Debug, Serialize, Deserialize)]
struct CodeJson {
    symbol: u8,
    length: usize,
    code: String,
}

/// JSON output for container information.
#[derive(Debug, Serialize, Deserialize)]
struct ContainerInfoJson {
    file: String,
    total_size: usize,
    header_size: usize,
    payload_size: usize,
    payload_bits: u64,
    pad_count: u8,
    symbol_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_code_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_code_length: Option<usize>,
    codes: Vec<CodeJson>,
}

impl ContainerInfoJson {
    fn from_info(file: &Path, info: &ContainerInfo) -> Self {
        let range = info.code_length_range();
        Self {
            file: file.display().to_string(),
            total_size: info.total_len,
            header_size: info.header_len,
            payload_size: info.payload_len,
            payload_bits: info.payload_bits,
            pad_count: info.pad_count,
            symbol_count: info.symbol_count(),
            min_code_length: range.map(|(min, _)| min),
            max_code_length: range.map(|(_, max)| max),
            codes: info
                .codes
                .iter()
                .map(|(symbol, code)| CodeJson {
                    symbol: *symbol,
                    length: code.len(),
                    code: code.to_string(),
                })
                .collect(),
        }
    }
}

pub fn cmd_info(file: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let data = read_input(file)?;
    let info = inspect(&data)?;

    if json {
        let output = ContainerInfoJson::from_info(file, &info);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("File: {}", file.display());
    println!("  Total size:   {} bytes", info.total_len);
    println!(
        "  Header:       {} bytes ({} symbols)",
        info.header_len,
        info.symbol_count()
    );
    println!(
        "  Payload:      {} bytes ({} bits, {} pad)",
        info.payload_len, info.payload_bits, info.pad_count
    );
    if let Some((min, max)) = info.code_length_range() {
        println!("  Code lengths: {}-{} bits", min, max);
    }

    if !info.codes.is_empty() {
        println!();
        println!("{:>6} {:>5} {:>6}  Code", "Symbol", "Char", "Length");
        println!("{}", "-".repeat(40));
        for (symbol, code) in &info.codes {
            println!(
                "{:>#6x} {:>5} {:>6}  {}",
                symbol,
                display_symbol(*symbol),
                code.len(),
                code
            );
        }
    }

    Ok(())
}
