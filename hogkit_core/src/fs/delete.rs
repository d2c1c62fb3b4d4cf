//! Careful directory deletion guarded by a filename allow-list.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Set of leading characters a file name may start with and still be
/// considered disposable. Only the first character is ever inspected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    prefixes: BTreeSet<char>,
}

impl AllowList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the list from the first character of each prefix string.
    /// Empty strings contribute nothing.
    pub fn from_prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        prefixes
            .into_iter()
            .filter_map(|p| p.as_ref().chars().next())
            .collect()
    }

    pub fn insert(&mut self, prefix: char) -> bool {
        self.prefixes.insert(prefix)
    }

    pub fn contains(&self, prefix: char) -> bool {
        self.prefixes.contains(&prefix)
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Whether `file_name` (no directory component) starts with an allowed
    /// character. An empty name is never allowed.
    pub fn allows(&self, file_name: &str) -> bool {
        file_name.chars().next().is_some_and(|c| self.contains(c))
    }
}

impl FromIterator<char> for AllowList {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self {
            prefixes: iter.into_iter().collect(),
        }
    }
}

impl From<&str> for AllowList {
    /// Every character of `chars` becomes an allowed prefix.
    fn from(chars: &str) -> Self {
        chars.chars().collect()
    }
}

/// Returns the first file under `folder` whose name does not start with an
/// allowed character, or `None` when the whole tree is disposable.
///
/// Every non-directory entry counts as a file, symlinks included. Links are
/// not followed.
pub fn find_disallowed(folder: impl AsRef<Path>, allowed: &AllowList) -> Result<Option<PathBuf>> {
    for entry in WalkDir::new(folder.as_ref()).follow_links(false) {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !allowed.allows(&name) {
            return Ok(Some(entry.into_path()));
        }
    }
    Ok(None)
}

/// Deletes `folder` only if nothing important is inside it.
///
/// An empty directory is always removed. Otherwise the tree is removed only
/// if every file anywhere beneath it starts with a character in `allowed`.
/// Returns whether the directory was deleted. A blocked delete is `Ok(false)`
/// and leaves the tree untouched.
///
/// Filesystem failures propagate unchanged. Not safe against concurrent
/// writers: a file created between the check and the removal is deleted too.
pub fn careful_delete(folder: impl AsRef<Path>, allowed: &AllowList) -> Result<bool> {
    let folder = folder.as_ref();

    let metadata = fs::symlink_metadata(folder).map_err(|e| Error::from_io(e, folder))?;
    if !metadata.is_dir() {
        return Err(Error::NotADirectory(folder.to_path_buf()));
    }

    match fs::remove_dir(folder) {
        Ok(()) => {
            log::debug!("removed empty directory {}", folder.display());
            return Ok(true);
        }
        Err(e) if e.kind() == io::ErrorKind::DirectoryNotEmpty => {}
        Err(e) => return Err(Error::from_io(e, folder)),
    }

    if let Some(blocker) = find_disallowed(folder, allowed)? {
        log::info!(
            "not deleting {}: {} is not in the allow-list",
            folder.display(),
            blocker.display()
        );
        return Ok(false);
    }

    fs::remove_dir_all(folder).map_err(|e| Error::from_io(e, folder))?;
    log::debug!("removed directory tree {}", folder.display());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn test_allow_list_first_char_only() {
        let allowed = AllowList::from(".~");
        assert!(allowed.allows(".DS_Store"));
        assert!(allowed.allows("~lock"));
        assert!(!allowed.allows("report.txt"));
        assert!(!allowed.allows(""));
    }

    #[test]
    fn test_allow_list_from_prefixes() {
        let allowed = AllowList::from_prefixes([".DS_Store", "_tmp", ""]);
        assert!(allowed.contains('.'));
        assert!(allowed.contains('_'));
        assert!(!allowed.contains('D'));
        assert!(allowed.allows("_cache"));
    }

    #[test]
    fn test_empty_dir_removed_with_empty_allow_list() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("empty");
        fs::create_dir(&dir).unwrap();

        assert!(careful_delete(&dir, &AllowList::new()).unwrap());
        assert!(!dir.exists());
    }

    #[test]
    fn test_only_empty_subdirs_removed() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested");
        fs::create_dir_all(dir.join("a/b/c")).unwrap();
        fs::create_dir_all(dir.join("d")).unwrap();

        assert!(careful_delete(&dir, &AllowList::new()).unwrap());
        assert!(!dir.exists());
    }

    #[test]
    fn test_allowed_files_removed() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("junk");
        touch(&dir.join(".DS_Store"));
        touch(&dir.join(".tmp_cache"));
        touch(&dir.join("sub/.hidden"));

        assert!(careful_delete(&dir, &AllowList::from(".")).unwrap());
        assert!(!dir.exists());
    }

    #[test]
    fn test_deep_disallowed_file_blocks_delete() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("keep");
        touch(&dir.join(".DS_Store"));
        touch(&dir.join("x/y/important.doc"));

        assert!(!careful_delete(&dir, &AllowList::from(".")).unwrap());
        assert!(dir.join(".DS_Store").exists());
        assert!(dir.join("x/y/important.doc").exists());
    }

    #[test]
    fn test_find_disallowed_reports_blocker() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join(".ok"));
        touch(&temp.path().join("bad"));

        let blocker = find_disallowed(temp.path(), &AllowList::from(".")).unwrap();
        assert_eq!(blocker, Some(temp.path().join("bad")));
        assert_eq!(find_disallowed(temp.path(), &AllowList::from(".b")).unwrap(), None);
    }

    #[test]
    fn test_missing_folder_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = careful_delete(temp.path().join("gone"), &AllowList::from(".")).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_file_target_is_rejected() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("plain.txt");
        touch(&file);

        let err = careful_delete(&file, &AllowList::from("p")).unwrap_err();
        assert!(matches!(err, Error::NotADirectory(_)));
        assert!(file.exists());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_locked_parent_is_permission_denied() {
        use std::os::unix::fs::PermissionsExt;

        // Root bypasses directory write permission.
        if unsafe { libc::geteuid() } == 0 {
            return;
        }
        let temp = TempDir::new().unwrap();
        let parent = temp.path().join("locked");
        let dir = parent.join("victim");
        touch(&dir.join(".DS_Store"));
        fs::set_permissions(&parent, fs::Permissions::from_mode(0o555)).unwrap();

        let result = careful_delete(&dir, &AllowList::from("."));
        fs::set_permissions(&parent, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(matches!(result, Err(Error::PermissionDenied(ref p)) if p == &dir));
        assert!(dir.join(".DS_Store").exists());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_kernel_owned_dir_is_permission_denied() {
        let dir = Path::new("/sys/kernel");
        if !dir.is_dir() {
            return;
        }
        let result = careful_delete(dir, &AllowList::from("abcdefghijklmnopqrstuvwxyz_."));
        // Containers that mount /sys read-only report EROFS instead.
        assert!(
            matches!(result, Err(Error::PermissionDenied(_)) | Err(Error::Io(_))),
            "{:?}",
            result
        );
        assert!(dir.is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_entry_is_checked_not_followed() {
        let temp = TempDir::new().unwrap();
        let outside = temp.path().join("outside");
        touch(&outside.join("precious"));
        let dir = temp.path().join("links");
        fs::create_dir(&dir).unwrap();
        std::os::unix::fs::symlink(&outside, dir.join(".link")).unwrap();

        assert!(careful_delete(&dir, &AllowList::from(".")).unwrap());
        assert!(!dir.exists());
        assert!(outside.join("precious").exists());
    }
}
