//! Indexed filename allocation: `name(1).ext`, `name(2).ext`, ...

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A base name, extension and index that map to `base(index)extension`.
///
/// The extension is appended verbatim, so it carries its own dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedName<'a> {
    pub base: &'a str,
    pub extension: &'a str,
    pub index: u64,
}

impl<'a> IndexedName<'a> {
    pub fn new(base: &'a str, extension: &'a str, index: u64) -> Self {
        Self { base, extension, index }
    }

    pub fn file_name(&self) -> String {
        format!("{}({}){}", self.base, self.index, self.extension)
    }

    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(self.file_name())
    }
}

/// Whether anything, including a dangling symlink, sits at `path`.
fn entry_exists(path: &Path) -> Result<bool> {
    match fs::symlink_metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::from_io(e, path)),
    }
}

/// Returns `dir/base(n)extension` for the smallest `n >= 1` with nothing at
/// that path yet.
///
/// ```no_run
/// // /tmp/x holds a.txt and a(1).txt
/// let path = hogkit_core::append_index("a", ".txt", "/tmp/x")?;
/// assert_eq!(path, std::path::Path::new("/tmp/x/a(2).txt"));
/// # Ok::<(), hogkit_core::Error>(())
/// ```
///
/// Nothing is created. Two callers racing on the same directory can be handed
/// the same path.
pub fn append_index(base: &str, extension: &str, dir: impl AsRef<Path>) -> Result<PathBuf> {
    let dir = dir.as_ref();
    let mut name = IndexedName::new(base, extension, 1);
    loop {
        let candidate = name.path_in(dir);
        if !entry_exists(&candidate)? {
            log::debug!("allocated {}", candidate.display());
            return Ok(candidate);
        }
        name.index += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_indexed_name_format() {
        assert_eq!(IndexedName::new("a", ".txt", 3).file_name(), "a(3).txt");
        assert_eq!(IndexedName::new("log", "", 1).file_name(), "log(1)");
    }

    #[test]
    fn test_first_index_is_one() {
        let temp = TempDir::new().unwrap();
        let path = append_index("a", ".txt", temp.path()).unwrap();
        assert_eq!(path, temp.path().join("a(1).txt"));
    }

    #[test]
    fn test_unindexed_original_is_ignored() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "").unwrap();
        fs::write(temp.path().join("a(1).txt"), "").unwrap();

        let path = append_index("a", ".txt", temp.path()).unwrap();
        assert_eq!(path, temp.path().join("a(2).txt"));
    }

    #[test]
    fn test_scan_is_repeatable_until_created() {
        let temp = TempDir::new().unwrap();
        let first = append_index("b", ".log", temp.path()).unwrap();
        let again = append_index("b", ".log", temp.path()).unwrap();
        assert_eq!(first, again);

        fs::write(&first, "").unwrap();
        let next = append_index("b", ".log", temp.path()).unwrap();
        assert_eq!(next, temp.path().join("b(2).log"));
    }

    #[test]
    fn test_lowest_gap_is_reused() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("c(1).txt"), "").unwrap();
        fs::write(temp.path().join("c(3).txt"), "").unwrap();

        let path = append_index("c", ".txt", temp.path()).unwrap();
        assert_eq!(path, temp.path().join("c(2).txt"));
    }

    #[test]
    fn test_directory_occupying_name_counts() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("d(1).txt")).unwrap();

        let path = append_index("d", ".txt", temp.path()).unwrap();
        assert_eq!(path, temp.path().join("d(2).txt"));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_counts_as_taken() {
        let temp = TempDir::new().unwrap();
        std::os::unix::fs::symlink(temp.path().join("nowhere"), temp.path().join("e(1).txt"))
            .unwrap();

        let path = append_index("e", ".txt", temp.path()).unwrap();
        assert_eq!(path, temp.path().join("e(2).txt"));
    }
}
