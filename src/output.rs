//! Output file writing.
//!
//! All writes go through a temp file in the destination directory
//! followed by an atomic rename, so a crashed run never leaves a
//! half-written list behind. When a backup directory is configured,
//! the previous copy of an output file is moved there before the new
//! one lands.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::Result;

/// Write text entries to `path`, one per line, `\n`-terminated, UTF-8.
pub fn write_lines<I, S>(path: &Path, lines: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut buf = String::new();
    let mut count = 0usize;
    for line in lines {
        buf.push_str(line.as_ref());
        buf.push('\n');
        count += 1;
    }

    write_atomic(path, buf.as_bytes())?;
    log::info!("Wrote {} entries to {:?}", count, path);
    Ok(())
}

/// Write raw bytes to `path`.
pub fn write_bytes(path: &Path, data: &[u8]) -> Result<()> {
    write_atomic(path, data)?;
    log::info!("Wrote {} bytes to {:?}", data.len(), path);
    Ok(())
}

/// Move an existing file at `path` into `backup_dir` before it is
/// replaced. Does nothing if `path` does not exist.
pub fn backup_existing(path: &Path, backup_dir: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    fs::create_dir_all(backup_dir)?;
    let backup_path = backup_dir.join(file_name(path));
    fs::rename(path, &backup_path)?;
    log::info!("Moved previous {:?} to {:?}", path, backup_path);
    Ok(())
}

fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = temp_path(path);
    let mut temp_file = fs::File::create(&temp_path)?;
    temp_file.write_all(data)?;
    temp_file.sync_all()?;
    drop(temp_file);

    fs::rename(&temp_path, path)?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = file_name(path);
    name.push_str(".tmp");
    path.with_file_name(name)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
