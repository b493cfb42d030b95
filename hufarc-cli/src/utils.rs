//! Utility functions for the CLI.

use dialoguer::Confirm;
use filetime::FileTime;
use hufarc_huffman::{FileJob, FileReport, find_duplicate_output};
use indicatif::{ProgressBar, ProgressStyle};
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Extension given to compressed files.
pub const COMPRESSED_EXTENSION: &str = "huf";

/// Extension appended when a decompressed name cannot be derived.
pub const FALLBACK_EXTENSION: &str = "out";

/// Create a progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("progress bar template is valid")
            .progress_chars("█▓▒░ "),
    );
    pb
}

/// `notes.txt` becomes `notes.txt.huf`.
pub fn default_compressed_path(input: &Path) -> PathBuf {
    append_extension(input, COMPRESSED_EXTENSION)
}

/// `notes.txt.huf` becomes `notes.txt`; anything else gets `.out` appended.
pub fn default_decompressed_path(input: &Path) -> PathBuf {
    let has_stem = input
        .file_stem()
        .is_some_and(|stem| !stem.is_empty() && stem != OsStr::new("."));

    if has_stem && input.extension() == Some(OsStr::new(COMPRESSED_EXTENSION)) {
        input.with_extension("")
    } else {
        append_extension(input, FALLBACK_EXTENSION)
    }
}

fn append_extension(path: &Path, extension: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// Pair every input with its output path.
///
/// An explicit `output` is only accepted for a single input, and no two jobs
/// may write the same output.
pub fn plan_jobs(
    inputs: &[PathBuf],
    output: Option<&Path>,
    default_output: fn(&Path) -> PathBuf,
) -> Result<Vec<FileJob>, Box<dyn std::error::Error>> {
    if inputs.is_empty() {
        return Err("no input files given".into());
    }

    let jobs: Vec<FileJob> = match output {
        Some(output) if inputs.len() == 1 => vec![FileJob::new(&inputs[0], output)],
        Some(_) => return Err("--output can only be used with a single input file".into()),
        None => inputs
            .iter()
            .map(|input| FileJob::new(input, default_output(input)))
            .collect(),
    };

    if let Some(job) = jobs.iter().find(|job| job.input == job.output) {
        return Err(format!(
            "input and output are the same file: {}",
            job.input.display()
        )
        .into());
    }

    if let Some(index) = find_duplicate_output(&jobs) {
        let job = &jobs[index];
        return Err(format!(
            "{} would overwrite the output of another input: {}",
            job.input.display(),
            job.output.display()
        )
        .into());
    }

    Ok(jobs)
}

/// Drop jobs whose output exists and the user declined to overwrite.
pub fn confirm_overwrites(
    jobs: Vec<FileJob>,
    force: bool,
) -> Result<Vec<FileJob>, Box<dyn std::error::Error>> {
    if force {
        return Ok(jobs);
    }

    let mut kept = Vec::with_capacity(jobs.len());
    for job in jobs {
        if job.output.exists() {
            let overwrite = Confirm::new()
                .with_prompt(format!("{} already exists. Overwrite?", job.output.display()))
                .default(false)
                .interact()?;
            if !overwrite {
                println!("  skipped: {}", job.input.display());
                continue;
            }
        }
        kept.push(job);
    }
    Ok(kept)
}

/// Give `output` the modification time of `input`.
pub fn copy_mtime(input: &Path, output: &Path) -> io::Result<()> {
    let metadata = fs::metadata(input)?;
    let mtime = FileTime::from_last_modification_time(&metadata);
    filetime::set_file_mtime(output, mtime)
}

/// Print a one-line summary of a finished file.
pub fn print_report(verb: &str, report: &FileReport) {
    println!(
        "  {}: {} -> {} ({} -> {} bytes, {:.1}% saved, {} symbols)",
        verb,
        report.input.display(),
        report.output.display(),
        report.input_size,
        report.output_size,
        report.space_savings(),
        report.symbol_count
    );
}

/// Printable rendering of a byte for code table listings.
pub fn display_symbol(symbol: u8) -> String {
    match symbol {
        b' ' => "' '".to_string(),
        0x21..=0x7E => format!("'{}'", symbol as char),
        _ => "   ".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_compressed_path() {
        assert_eq!(
            default_compressed_path(Path::new("notes.txt")),
            PathBuf::from("notes.txt.huf")
        );
        assert_eq!(
            default_compressed_path(Path::new("dir/archive")),
            PathBuf::from("dir/archive.huf")
        );
    }

    #[test]
    fn test_default_decompressed_path() {
        assert_eq!(
            default_decompressed_path(Path::new("notes.txt.huf")),
            PathBuf::from("notes.txt")
        );
        assert_eq!(
            default_decompressed_path(Path::new("dir/data.huf")),
            PathBuf::from("dir/data")
        );
        assert_eq!(
            default_decompressed_path(Path::new("data.bin")),
            PathBuf::from("data.bin.out")
        );
        assert_eq!(
            default_decompressed_path(Path::new(".huf")),
            PathBuf::from(".huf.out")
        );
    }

    #[test]
    fn test_plan_jobs_defaults() {
        let inputs = vec![PathBuf::from("a.txt"), PathBuf::from("b.bin")];
        let jobs = plan_jobs(&inputs, None, default_compressed_path).unwrap();
        assert_eq!(
            jobs,
            vec![
                FileJob::new("a.txt", "a.txt.huf"),
                FileJob::new("b.bin", "b.bin.huf")
            ]
        );
    }

    #[test]
    fn test_plan_jobs_explicit_output() {
        let inputs = vec![PathBuf::from("a.txt")];
        let jobs = plan_jobs(&inputs, Some(Path::new("packed")), default_compressed_path).unwrap();
        assert_eq!(jobs, vec![FileJob::new("a.txt", "packed")]);

        let inputs = vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")];
        assert!(plan_jobs(&inputs, Some(Path::new("packed")), default_compressed_path).is_err());
    }

    #[test]
    fn test_plan_jobs_rejects_same_path() {
        let inputs = vec![PathBuf::from("a.txt")];
        assert!(plan_jobs(&inputs, Some(Path::new("a.txt")), default_compressed_path).is_err());
        assert!(plan_jobs(&[], None, default_compressed_path).is_err());
    }

    #[test]
    fn test_plan_jobs_rejects_colliding_outputs() {
        // "a" falls back to "a.out", which is also what "a.out.huf" strips to
        let inputs = vec![PathBuf::from("a"), PathBuf::from("a.out.huf")];
        let err = plan_jobs(&inputs, None, default_decompressed_path).unwrap_err();
        assert!(err.to_string().contains("a.out"));

        let inputs = vec![PathBuf::from("x.txt"), PathBuf::from("x.txt")];
        assert!(plan_jobs(&inputs, None, default_compressed_path).is_err());
    }

    #[test]
    fn test_copy_mtime() {
        let dir = std::env::temp_dir().join(format!("hufarc-cli-mtime-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("input.bin");
        let output = dir.join("input.bin.huf");
        fs::write(&input, b"data").unwrap();
        fs::write(&output, b"packed").unwrap();

        let mtime = FileTime::from_unix_time(1_600_000_000, 0);
        filetime::set_file_mtime(&input, mtime).unwrap();
        copy_mtime(&input, &output).unwrap();

        let copied = FileTime::from_last_modification_time(&fs::metadata(&output).unwrap());
        assert_eq!(copied, mtime);
        assert!(copy_mtime(&dir.join("missing"), &output).is_err());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_display_symbol() {
        assert_eq!(display_symbol(b'A'), "'A'");
        assert_eq!(display_symbol(b' '), "' '");
        assert_eq!(display_symbol(0x0A), "   ");
    }
}
