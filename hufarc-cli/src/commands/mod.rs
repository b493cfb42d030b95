//! Command implementations for HufArc CLI.

pub mod completions;
pub mod compress;
pub mod decompress;
pub mod info;

pub use completions::cmd_completions;
pub use compress::{CompressOptions, cmd_compress};
pub use decompress::{DecompressOptions, cmd_decompress};
pub use info::cmd_info;
pub use test::cmd_test;

use crate::utils::{copy_mtime, print_report};
use hufarc_huffman::{FileJob, FileReport, Result};
use indicatif::ProgressBar;

/// Report the results of a batch and fail if any job failed.
///
/// `results` is in the same order as `jobs`. The bar has already been
/// advanced by the batch as each job finished.
fn finish_batch(
    verb: &str,
    jobs: &[FileJob],
    results: Vec<Result<FileReport>>,
    verbose: bool,
    pb: &ProgressBar,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let mut failures = 0usize;
    let mut total_in = 0u64;
    let mut total_out = 0u64;

    for (job, result) in jobs.iter().zip(results) {
        match result {
            Ok(report) => {
                if let Err(e) = copy_mtime(&report.input, &report.output) {
                    pb.suspend(|| {
                        eprintln!(
                            "  warning: could not set modification time on {}: {}",
                            report.output.display(),
                            e
                        )
                    });
                }
                if verbose {
                    pb.suspend(|| print_report(verb, &report));
                }
                total_in += report.input_size;
                total_out += report.output_size;
            }
            Err(e) => {
                failures += 1;
                pb.suspend(|| eprintln!("  FAILED: {} - {}", job.input.display(), e));
            }
        }
    }
    pb.finish_and_clear();

    let succeeded = jobs.len() - failures;
    println!(
        "{} {} file(s): {} -> {} bytes",
        verb, succeeded, total_in, total_out
    );

    if failures > 0 {
        return Err(format!("{} of {} file(s) failed", failures, jobs.len()).into());
    }
    Ok(())
}
