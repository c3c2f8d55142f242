use std::fs::{OpenOptions, create_dir_all, remove_file};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tripsum_core::{Result, Summary};

pub const BANNER: &str = "=== Summary ===";

/// Write `summary` to `path`, then echo it to `console`.
///
/// The file is complete before anything is printed.
pub fn report<W: Write>(summary: &Summary, path: &Path, console: &mut W) -> Result<()> {
    let json = summary.to_pretty_json()?;
    write_bytes_atomic(path, json.as_bytes())?;

    writeln!(console, "{BANNER}")?;
    writeln!(console, "{json}")?;
    writeln!(console, "Wrote {}", path.display())?;
    console.flush()?;
    Ok(())
}

fn write_bytes_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    let parent = path.parent().filter(|parent| !parent.as_os_str().is_empty());
    if let Some(parent) = parent {
        create_dir_all(parent)?;
    }

    let tmp_path = temp_path(path)?;
    let result = write_and_rename(&tmp_path, path, data, parent);
    if result.is_err() && tmp_path.exists() {
        // best effort; the write error is what gets reported
        let _ = remove_file(&tmp_path);
    }
    result
}

fn write_and_rename(
    tmp_path: &Path,
    path: &Path,
    data: &[u8],
    parent: Option<&Path>,
) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;

    std::fs::rename(tmp_path, path)?;
    if let Some(parent) = parent {
        sync_dir(parent)?;
    }
    Ok(())
}

fn temp_path(path: &Path) -> io::Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("output path {} has no file name", path.display()),
        )
    })?;
    let tmp_name = format!("{}.tmp", file_name.to_string_lossy());
    Ok(path.with_file_name(tmp_name))
}

fn sync_dir(path: &Path) -> io::Result<()> {
    let dir = OpenOptions::new().read(true).open(path)?;
    dir.sync_all()
}
