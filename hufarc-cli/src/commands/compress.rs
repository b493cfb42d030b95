//! Compress command implementation.

use super::finish_batch;
use crate::utils::{confirm_overwrites, create_progress_bar, default_compressed_path, plan_jobs};
use hufarc_huffman::{HuffmanConfig, compress_files_with_progress};
use std::path::{Path, PathBuf};

/// Options for compressing files.
pub struct CompressOptions<'a> {
    pub output: Option<&'a Path>,
    pub force: bool,
    pub strict: bool,
    pub verbose: bool,
    pub progress: bool,
}

pub fn cmd_compress(
    files: &[PathBuf],
    options: &CompressOptions<'_>,
) -> Result<(), Box<dyn std::error::Error>> {
    let jobs = plan_jobs(files, options.output, default_compressed_path)?;
    let jobs = confirm_overwrites(jobs, options.force)?;
    if jobs.is_empty() {
        println!("Nothing to compress");
        return Ok(());
    }

    let config = if options.strict {
        HuffmanConfig::STRICT
    } else {
        HuffmanConfig::DEFAULT
    };

    if options.verbose {
        println!("Compressing {} file(s)", jobs.len());
    }

    let pb = create_progress_bar(jobs.len() as u64, options.progress && jobs.len() > 1);
    pb.set_message("compressing");
    let results = compress_files_with_progress(&jobs, &config, |_, _| pb.inc(1));

    finish_batch("Compressed", &jobs, results, options.verbose, &pb)
}
