//! Processing several independent files.
//!
//! Every job is its own session with its own tree, tables and buffers, so
//! jobs never share mutable state. With the `parallel` feature the jobs run
//! on rayon's thread pool; otherwise they run one after another. Results come
//! back in job order either way, and one failing job does not stop the rest.
//!
//! A job whose output path was already claimed by an earlier job in the same
//! batch is not run and fails with an `InvalidInput` I/O error.

use crate::config::HuffmanConfig;
use crate::file::{FileReport, compress_file_with_config, decompress_file_with_config};
use hufarc_core::error::{HufArcError, Result};
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// An input/output pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileJob {
    /// File to read.
    pub input: PathBuf,
    /// File to write.
    pub output: PathBuf,
}

impl FileJob {
    /// Create a job.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

/// Index of the first job that writes the same output as an earlier one.
pub fn find_duplicate_output(jobs: &[FileJob]) -> Option<usize> {
    duplicate_outputs(jobs).iter().position(|&duplicate| duplicate)
}

/// Compress every job, returning one result per job in order.
pub fn compress_files(jobs: &[FileJob], config: &HuffmanConfig) -> Vec<Result<FileReport>> {
    compress_files_with_progress(jobs, config, |_, _| {})
}

/// Compress every job, calling `on_done` as each job finishes.
///
/// `on_done` runs on the worker that handled the job, in completion order.
pub fn compress_files_with_progress<P>(
    jobs: &[FileJob],
    config: &HuffmanConfig,
    on_done: P,
) -> Vec<Result<FileReport>>
where
    P: Fn(&FileJob, &Result<FileReport>) + Sync,
{
    run_jobs(
        jobs,
        |job| compress_file_with_config(&job.input, &job.output, config),
        on_done,
    )
}

/// Decompress every job, returning one result per job in order.
pub fn decompress_files(jobs: &[FileJob], config: &HuffmanConfig) -> Vec<Result<FileReport>> {
    decompress_files_with_progress(jobs, config, |_, _| {})
}

/// Decompress every job, calling `on_done` as each job finishes.
///
/// `on_done` runs on the worker that handled the job, in completion order.
pub fn decompress_files_with_progress<P>(
    jobs: &[FileJob],
    config: &HuffmanConfig,
    on_done: P,
) -> Vec<Result<FileReport>>
where
    P: Fn(&FileJob, &Result<FileReport>) + Sync,
{
    run_jobs(
        jobs,
        |job| decompress_file_with_config(&job.input, &job.output, config),
        on_done,
    )
}

/// Outputs claimed by an earlier job, indexed by job.
fn duplicate_outputs(jobs: &[FileJob]) -> Vec<bool> {
    let mut seen: HashSet<&Path> = HashSet::with_capacity(jobs.len());
    jobs.iter()
        .map(|job| !seen.insert(job.output.as_path()))
        .collect()
}

fn run_one<F, P>(job: &FileJob, duplicate: bool, work: &F, on_done: &P) -> Result<FileReport>
where
    F: Fn(&FileJob) -> Result<FileReport>,
    P: Fn(&FileJob, &Result<FileReport>),
{
    let result = if duplicate {
        Err(HufArcError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "output {} is already written by another job",
                job.output.display()
            ),
        )))
    } else {
        work(job)
    };
    on_done(job, &result);
    result
}

#[cfg(feature = "parallel")]
fn run_jobs<F, P>(jobs: &[FileJob], work: F, on_done: P) -> Vec<Result<FileReport>>
where
    F: Fn(&FileJob) -> Result<FileReport> + Sync + Send,
    P: Fn(&FileJob, &Result<FileReport>) + Sync,
{
    let duplicates = duplicate_outputs(jobs);
    jobs.par_iter()
        .zip(duplicates.par_iter())
        .map(|(job, &duplicate)| run_one(job, duplicate, &work, &on_done))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn run_jobs<F, P>(jobs: &[FileJob], work: F, on_done: P) -> Vec<Result<FileReport>>
where
    F: Fn(&FileJob) -> Result<FileReport>,
    P: Fn(&FileJob, &Result<FileReport>) + Sync,
{
    let duplicates = duplicate_outputs(jobs);
    jobs.iter()
        .zip(&duplicates)
        .map(|(job, &duplicate)| run_one(job, duplicate, &work, &on_done))
        .collect()
}
