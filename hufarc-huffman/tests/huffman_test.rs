//! Huffman codec integration tests.

use hufarc_huffman::container::{RECORD_LEN, SYMBOL_COUNT_LEN, pack_code_field};
use hufarc_huffman::{
    Code, CodeTable, FileJob, FrequencyTable, HufArcError, HuffmanConfig, HuffmanEncoder,
    HuffmanTree, compress, compress_file, compress_files, decompress, decompress_file,
    decompress_file_with_config, decompress_files, inspect,
};
use std::fs;
use std::path::PathBuf;

/// Reproducible pseudo-random bytes.
fn pseudo_random(size: usize, mut seed: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    for _ in 0..size {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        data.push((seed >> 32) as u8);
    }
    data
}

/// Fresh scratch directory for a test.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("hufarc-test-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

fn assert_roundtrip(original: &[u8]) {
    let compressed = compress(original).expect("compression failed");
    let decompressed = decompress(&compressed).expect("decompression failed");
    assert_eq!(decompressed.len(), original.len());
    assert_eq!(decompressed, original);
}

#[test]
fn test_roundtrip_empty() {
    assert_roundtrip(b"");
}

#[test]
fn test_roundtrip_single_byte() {
    assert_roundtrip(b"\x00");
    assert_roundtrip(b"\xFF");
}

#[test]
fn test_roundtrip_all_identical() {
    for len in [1, 7, 8, 9, 1000] {
        assert_roundtrip(&vec![b'X'; len]);
    }
}

#[test]
fn test_roundtrip_all_byte_values() {
    let original: Vec<u8> = (0..=255).collect();
    assert_roundtrip(&original);

    let reversed: Vec<u8> = (0..=255).rev().cycle().take(4096).collect();
    assert_roundtrip(&reversed);
}

#[test]
fn test_roundtrip_text() {
    let original = b"The quick brown fox jumps over the lazy dog. ".repeat(100);
    let compressed = compress(&original).expect("compression failed");

    // English text has far fewer than 256 symbols and a skewed distribution
    assert!(compressed.len() < original.len());
    assert_eq!(decompress(&compressed).expect("decompression failed"), original);
}

#[test]
fn test_roundtrip_random() {
    for (size, seed) in [(1, 1), (33, 2), (4096, 3), (65536, 4)] {
        assert_roundtrip(&pseudo_random(size, seed));
    }
}

#[test]
fn test_roundtrip_skewed_distribution() {
    // Fibonacci counts produce the deepest possible tree for 24 symbols
    let mut original = Vec::new();
    let (mut a, mut b) = (1usize, 1usize);
    for symbol in 0..24u8 {
        original.extend(std::iter::repeat_n(symbol.wrapping_mul(11), a));
        (a, b) = (b, a + b);
    }
    let info = inspect(&compress(&original).unwrap()).unwrap();
    assert_eq!(info.code_length_range(), Some((1, 23)));
    assert_roundtrip(&original);
}

#[test]
fn test_concrete_aabc() {
    let original = [0x41, 0x41, 0x42, 0x43];
    let compressed = compress(&original).unwrap();

    assert_eq!(&compressed[..SYMBOL_COUNT_LEN], &[0x00, 0x03]);
    let info = inspect(&compressed).unwrap();
    assert_eq!(info.symbol_count(), 3);
    assert_eq!(info.payload_len, 1);
    assert_eq!(info.payload_bits + info.pad_count as u64, 8);

    let codes: Vec<(u8, String)> = info
        .codes
        .iter()
        .map(|(s, c)| (*s, c.to_string()))
        .collect();
    assert_eq!(
        codes,
        vec![
            (0x41, "0".to_string()),
            (0x42, "10".to_string()),
            (0x43, "11".to_string())
        ]
    );
    // 0 0 10 11 -> 0010_11 + 00 padding
    assert_eq!(compressed[compressed.len() - 2], 0b0010_1100);
    assert_eq!(compressed[compressed.len() - 1], 2);

    assert_eq!(decompress(&compressed).unwrap(), original);
}

#[test]
fn test_degenerate_single_symbol() {
    let original = vec![0x7Eu8; 12345];
    let compressed = compress(&original).unwrap();

    let info = inspect(&compressed).unwrap();
    assert_eq!(info.symbol_count(), 1);
    assert_eq!(info.codes[0], (0x7E, Code::parse_bits("0").unwrap()));
    assert_eq!(info.payload_bits, 12345);

    assert_eq!(decompress(&compressed).unwrap(), original);
}

#[test]
fn test_codes_are_prefix_free() {
    for seed in 1..5 {
        let data: Vec<u8> = pseudo_random(2000, seed)
            .into_iter()
            .map(|b| b % (seed as u8 * 40 + 3))
            .collect();
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::count(&data)).unwrap();
        let table = CodeTable::from_tree(&tree);
        assert!(table.is_prefix_free());
    }
}

#[test]
fn test_header_preserves_codes() {
    let data = b"abracadabra alakazam, hocus pocus";
    let mut encoder = HuffmanEncoder::default();
    let compressed = encoder.encode(data).unwrap();

    let stored: CodeTable = {
        let mut table = CodeTable::new();
        for (symbol, code) in inspect(&compressed).unwrap().codes {
            table.insert(symbol, code);
        }
        table
    };
    assert_eq!(&stored, encoder.code_table());

    // Codes with leading zeros exist and survived
    assert!(stored.iter().any(|(_, c)| c.len() > 1 && !c.bit(0)));
}

#[test]
fn test_pad_count_and_bit_accounting() {
    for size in 1..64 {
        let data = pseudo_random(size, size as u64);
        let mut encoder = HuffmanEncoder::default();
        let compressed = encoder.encode(&data).unwrap();
        let info = inspect(&compressed).unwrap();

        assert!(info.pad_count <= 7);
        let expected_bits = encoder
            .code_table()
            .encoded_bits(&FrequencyTable::count(&data));
        assert_eq!(info.payload_bits, expected_bits);
        assert_eq!(info.payload_len as u64, expected_bits.div_ceil(8));
    }
}

#[test]
fn test_deterministic_output() {
    let data = pseudo_random(5000, 42);
    assert_eq!(compress(&data).unwrap(), compress(&data).unwrap());
}

#[test]
fn test_corrupt_truncated_header() {
    let compressed = compress(b"hello world").unwrap();
    let err = decompress(&compressed[..SYMBOL_COUNT_LEN + RECORD_LEN]).unwrap_err();
    assert!(err.is_malformed());
}

#[test]
fn test_corrupt_pad_count() {
    let mut compressed = compress(b"hello world").unwrap();
    *compressed.last_mut().unwrap() = 0x09;
    assert!(matches!(
        decompress(&compressed),
        Err(HufArcError::CorruptPadCount { pad_count: 9 })
    ));
}

#[test]
fn test_corrupt_missing_marker() {
    let mut compressed = compress(b"hello world").unwrap();
    let field = SYMBOL_COUNT_LEN + 1;
    compressed[field..field + 32].fill(0);
    assert!(matches!(
        decompress(&compressed),
        Err(HufArcError::MalformedContainer { .. })
    ));
}

#[test]
fn test_corrupt_symbol_count() {
    let mut compressed = compress(b"hello world").unwrap();
    compressed[1] = compressed[1].wrapping_add(40);
    assert!(decompress(&compressed).unwrap_err().is_malformed());
}

#[test]
fn test_corrupt_payload_walks_off_tree() {
    // Single-symbol tree has no right branch, so any 1 bit is invalid
    let mut compressed = compress(&[5u8; 16]).unwrap();
    let payload_start = SYMBOL_COUNT_LEN + RECORD_LEN;
    compressed[payload_start] = 0b0000_0100;

    assert!(matches!(
        decompress(&compressed),
        Err(HufArcError::InvalidHuffmanCode { bit_position: 5 })
    ));
}

#[test]
fn test_mismatched_header_rejected() {
    // Header with two codes where one is a prefix of the other
    let mut data = vec![0x00, 0x02];
    data.push(b'a');
    data.extend_from_slice(&pack_code_field(&Code::parse_bits("1").unwrap()));
    data.push(b'b');
    data.extend_from_slice(&pack_code_field(&Code::parse_bits("10").unwrap()));
    data.extend_from_slice(&[0xFF, 0x00]);

    assert!(decompress(&data).unwrap_err().is_malformed());
    assert!(inspect(&data).is_err());
}

#[test]
fn test_file_roundtrip() {
    let dir = scratch_dir("file-roundtrip");
    let input = dir.join("input.bin");
    let packed = dir.join("input.bin.huf");
    let restored = dir.join("restored.bin");

    let original = b"file level round trip ".repeat(50);
    fs::write(&input, &original).unwrap();

    let report = compress_file(&input, &packed).unwrap();
    assert_eq!(report.input_size, original.len() as u64);
    assert_eq!(report.output_size, fs::metadata(&packed).unwrap().len());
    assert!(report.space_savings() > 0.0);

    let report = decompress_file(&packed, &restored).unwrap();
    assert_eq!(report.output_size, original.len() as u64);
    assert_eq!(report.symbol_count, 13);
    assert_eq!(fs::read(&restored).unwrap(), original);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_file_missing_input() {
    let dir = scratch_dir("file-missing");
    let err = compress_file(dir.join("nope.bin"), dir.join("nope.huf")).unwrap_err();
    assert!(matches!(err, HufArcError::Io(_)));
    assert!(!dir.join("nope.huf").exists());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_file_failure_leaves_output_untouched() {
    let dir = scratch_dir("file-untouched");
    let bogus = dir.join("bogus.huf");
    let output = dir.join("output.bin");
    fs::write(&bogus, [0x00, 0x01, 0x02]).unwrap();
    fs::write(&output, b"keep me").unwrap();

    assert!(decompress_file(&bogus, &output).is_err());
    assert_eq!(fs::read(&output).unwrap(), b"keep me");

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_file_output_limit() {
    let dir = scratch_dir("file-limit");
    let input = dir.join("zeros.bin");
    let packed = dir.join("zeros.huf");
    let output = dir.join("zeros.out");
    fs::write(&input, vec![0u8; 4096]).unwrap();
    compress_file(&input, &packed).unwrap();

    let config = HuffmanConfig::new().with_max_output_size(Some(1024));
    let err = decompress_file_with_config(&packed, &output, &config).unwrap_err();
    assert!(matches!(err, HufArcError::OutputLimitExceeded { limit: 1024 }));
    assert!(!output.exists());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_batch_roundtrip() {
    let dir = scratch_dir("batch");
    let mut compress_jobs = Vec::new();
    let mut decompress_jobs = Vec::new();
    let mut originals = Vec::new();

    for i in 0..6u64 {
        let input = dir.join(format!("file{}.bin", i));
        let packed = dir.join(format!("file{}.huf", i));
        let restored = dir.join(format!("file{}.out", i));
        let data = pseudo_random(100 * i as usize, i + 10);
        fs::write(&input, &data).unwrap();

        compress_jobs.push(FileJob::new(&input, &packed));
        decompress_jobs.push(FileJob::new(&packed, &restored));
        originals.push((restored, data));
    }
    // One job that fails must not affect the others
    compress_jobs.push(FileJob::new(dir.join("missing.bin"), dir.join("missing.huf")));

    let results = compress_files(&compress_jobs, &HuffmanConfig::DEFAULT);
    assert_eq!(results.len(), 7);
    assert!(results[..6].iter().all(|r| r.is_ok()));
    assert!(results[6].is_err());

    let results = decompress_files(&decompress_jobs, &HuffmanConfig::DEFAULT);
    for (result, (restored, data)) in results.iter().zip(&originals) {
        let report = result.as_ref().expect("decompression failed");
        assert_eq!(&report.output, restored);
        assert_eq!(&fs::read(restored).unwrap(), data);
    }

    fs::remove_dir_all(&dir).unwrap();
}
