//! Decompress command implementation.

use super::finish_batch;
use crate::utils::{confirm_overwrites, create_progress_bar, default_decompressed_path, plan_jobs};
use hufarc_huffman::{HuffmanConfig, decompress_files_with_progress};
use std::path::{Path, PathBuf};

/// Options for decompressing files.
pub struct DecompressOptions<'a> {
    pub output: Option<&'a Path>,
    pub force: bool,
    pub max_output_size: Option<usize>,
    pub verbose: bool,
    pub progress: bool,
}

pub fn cmd_decompress(
    files: &[PathBuf],
    options: &DecompressOptions<'_>,
) -> Result<(), Box<dyn std::error::Error>> {
    let jobs = plan_jobs(files, options.output, default_decompressed_path)?;
    let jobs = confirm_overwrites(jobs, options.force)?;
    if jobs.is_empty() {
        println!("Nothing to decompress");
        return Ok(());
    }

    let config = HuffmanConfig::new().with_max_output_size(options.max_output_size);

    if options.verbose {
        println!("Decompressing {} file(s)", jobs.len());
        if let Some(limit) = options.max_output_size {
            println!("  output limit: {} bytes per file", limit);
        }
    }

    let pb = create_progress_bar(jobs.len() as u64, options.progress && jobs.len() > 1);
    pb.set_message("decompressing");
    let results = decompress_files_with_progress(&jobs, &config, |_, _| pb.inc(1));

    finish_batch("Decompressed", &jobs, results, options.verbose, &pb)
}
