//! Whole-file input and output helpers.
//!
//! Compression works on complete buffers, so the only file operations the
//! codec needs are "read every byte of a path" and "write every byte to a
//! path". Writes are all-or-nothing: data goes to a hidden temporary file in
//! the destination directory which is renamed over the destination once it
//! has been fully written and synced. If anything fails the temporary file is
//! removed and the destination is left untouched.
//!
//! With the `mmap` feature, [`read_input`] maps the file instead of copying it
//! into memory.

use crate::error::Result;
use std::fs::{self, File};
use std::io::{self, Write};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Distinguishes temporary files of concurrent writes within one process.
static WRITE_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Bytes of an input file.
#[derive(Debug)]
pub enum InputData {
    /// File contents copied into memory.
    Owned(Vec<u8>),
    /// Read-only memory map of the file.
    #[cfg(feature = "mmap")]
    Mapped(memmap2::Mmap),
}

impl Deref for InputData {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            InputData::Owned(bytes) => bytes,
            #[cfg(feature = "mmap")]
            InputData::Mapped(map) => map,
        }
    }
}

impl AsRef<[u8]> for InputData {
    fn as_ref(&self) -> &[u8] {
        self
    }
}

/// Read every byte of `path`.
#[cfg(not(feature = "mmap"))]
pub fn read_input(path: impl AsRef<Path>) -> Result<InputData> {
    Ok(InputData::Owned(fs::read(path)?))
}

/// Read every byte of `path` through a read-only memory map.
///
/// Empty files cannot be mapped on every platform and are returned as an
/// empty owned buffer.
#[cfg(feature = "mmap")]
pub fn read_input(path: impl AsRef<Path>) -> Result<InputData> {
    let file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Ok(InputData::Owned(Vec::new()));
    }
    // SAFETY: the mapping is read-only and dropped with the returned value.
    // Concurrent modification of the file by another process is outside the
    // contract of this function.
    let map = unsafe { memmap2::Mmap::map(&file)? };
    Ok(InputData::Mapped(map))
}

/// Write `data` to `path`, replacing any existing file atomically.
pub fn write_output(path: impl AsRef<Path>, data: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let temp = temp_path_for(path)?;

    let result = write_and_sync(&temp, data).and_then(|()| fs::rename(&temp, path));
    if let Err(e) = result {
        let _ = fs::remove_file(&temp);
        return Err(e.into());
    }

    Ok(())
}

fn write_and_sync(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data)?;
    file.sync_all()
}

/// Hidden sibling path used while `path` is being written.
///
/// Every call returns a fresh name, so two writes to the same destination
/// never share a temporary file.
fn temp_path_for(path: &Path) -> io::Result<PathBuf> {
    let name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("output path has no file name: {}", path.display()),
        )
    })?;

    let mut temp_name = std::ffi::OsString::from(".");
    temp_name.push(name);
    let sequence = WRITE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    temp_name.push(format!(".{}.{}.partial", std::process::id(), sequence));

    Ok(path.with_file_name(temp_name))
}
