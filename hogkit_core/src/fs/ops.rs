use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::{Error, Result};

/// Names skipped by `dirs_match` unless the caller supplies its own list.
pub const DEFAULT_IGNORE: &[&str] = &[".DS_Store"];

/// Body written by `make_file` when the caller has nothing better.
pub const DUMMY_CONTENT: &str = "CONTENT-AAAH";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferMode {
    #[default]
    Copy,
    Move,
}

/// Whether a failed `rename` only failed because source and target live on
/// different filesystems.
fn is_cross_device(error: &io::Error) -> bool {
    #[cfg(unix)]
    {
        error.raw_os_error() == Some(libc::EXDEV)
    }
    #[cfg(windows)]
    {
        // ERROR_NOT_SAME_DEVICE
        error.raw_os_error() == Some(17)
    }
    #[cfg(not(any(unix, windows)))]
    {
        let _ = error;
        false
    }
}

/// Names of the direct child directories of `dir`, sorted.
pub fn immediate_subdirs(dir: impl AsRef<Path>) -> Result<Vec<String>> {
    let dir = dir.as_ref();
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::from_io(e, dir))? {
        let entry = entry?;
        // Follows symlinks, so a link to a directory is listed.
        if entry.path().is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

fn entry_names(dir: &Path, ignore: &[&str]) -> Result<BTreeSet<String>> {
    let mut names = BTreeSet::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::from_io(e, dir))? {
        let name = entry?.file_name().to_string_lossy().into_owned();
        if !ignore.contains(&name.as_str()) {
            names.insert(name);
        }
    }
    Ok(names)
}

/// Shallow structural comparison: true when both directories hold the same
/// top-level entry names once `ignore` is removed. Contents are not compared.
pub fn dirs_match(dir_a: impl AsRef<Path>, dir_b: impl AsRef<Path>, ignore: &[&str]) -> Result<bool> {
    Ok(entry_names(dir_a.as_ref(), ignore)? == entry_names(dir_b.as_ref(), ignore)?)
}

/// Writes a small file at `location/name`, replacing any existing one.
pub fn make_file(location: impl AsRef<Path>, name: &str, content: &str) -> Result<PathBuf> {
    let location = location.as_ref();
    let path = location.join(name);
    fs::write(&path, content).map_err(|e| Error::from_io(e, &path))?;
    Ok(path)
}

/// Last modification time of `file` in local time.
pub fn mod_time(file: impl AsRef<Path>) -> Result<DateTime<Local>> {
    let file = file.as_ref();
    let modified = fs::metadata(file)
        .and_then(|m| m.modified())
        .map_err(|e| Error::from_io(e, file))?;
    Ok(DateTime::<Local>::from(modified))
}

/// Copies or moves `source_file` to `dest/relative_path`, keeping the relative
/// directory structure.
///
/// `relative_path` names the target file relative to `dest`, e.g.
/// `b/thefile.txt` sends `/source/a/b/thefile.txt` to `dest/b/thefile.txt`.
/// Missing parent directories are created when `create_dirs` is set.
/// Returns the destination path.
pub fn transfer_file(
    source_file: impl AsRef<Path>,
    relative_path: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    mode: TransferMode,
    create_dirs: bool,
) -> Result<PathBuf> {
    let source = source_file.as_ref();
    let relative = relative_path.as_ref();
    if relative.is_absolute() {
        return Err(Error::InvalidArgument(format!(
            "relative path expected, got {}",
            relative.display()
        )));
    }
    if !source.is_file() {
        return Err(Error::FileNotOnSource(source.to_path_buf()));
    }

    let target = dest.as_ref().join(relative);
    if create_dirs {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::from_io(e, parent))?;
        }
    }

    match mode {
        TransferMode::Copy => {
            fs::copy(source, &target).map_err(|e| Error::from_io(e, &target))?;
        }
        TransferMode::Move => {
            match fs::rename(source, &target) {
                Ok(()) => {}
                Err(e) if is_cross_device(&e) => {
                    log::debug!("{} is on another device, copying instead", target.display());
                    fs::copy(source, &target).map_err(|e| Error::from_io(e, &target))?;
                    fs::remove_file(source).map_err(|e| Error::from_io(e, source))?;
                }
                Err(e) => return Err(Error::from_io(e, source)),
            }
        }
    }
    log::debug!("{:?} {} -> {}", mode, source.display(), target.display());
    Ok(target)
}
