//! Path joining and normalization utilities.

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Drops `.` components and resolves `..` against the preceding component
/// without touching the filesystem. `..` at the root stays at the root.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out
}

/// Joins any number of path parts and returns an absolute, normalized path.
///
/// A part that is itself absolute restarts the path, the same as
/// `PathBuf::push`. Relative results are anchored at the current directory.
///
/// # Arguments
/// * `parts` - Path fragments in order
///
/// # Returns
/// Absolute path with `.` and `..` resolved lexically
pub fn smooth_join<I, P>(parts: I) -> Result<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut joined = PathBuf::new();
    for part in parts {
        joined.push(part);
    }
    let absolute = if joined.is_absolute() {
        joined
    } else {
        env::current_dir()?.join(joined)
    };
    Ok(dunce::simplified(&normalize_lexically(&absolute)).to_path_buf())
}

/// Directory holding the running executable, with symlinks resolved.
pub fn running_dir() -> Result<PathBuf> {
    let exe = env::current_exe()?;
    let exe = dunce::canonicalize(&exe).map_err(|e| Error::from_io(e, &exe))?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| Error::NotADirectory(exe.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lexically() {
        assert_eq!(normalize_lexically(Path::new("a/./b/../c")), PathBuf::from("a/c"));
        assert_eq!(normalize_lexically(Path::new("../x")), PathBuf::from("../x"));
        assert_eq!(normalize_lexically(Path::new("../../x")), PathBuf::from("../../x"));
    }

    #[cfg(unix)]
    #[test]
    fn test_normalize_parent_of_root() {
        assert_eq!(normalize_lexically(Path::new("/../etc")), PathBuf::from("/etc"));
    }

    #[cfg(unix)]
    #[test]
    fn test_smooth_join_absolute() {
        let joined = smooth_join(["/tmp", "a", "../b", "./c.txt"]).unwrap();
        assert_eq!(joined, PathBuf::from("/tmp/b/c.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn test_smooth_join_absolute_part_resets() {
        let joined = smooth_join(["/tmp/ignored", "/var", "log"]).unwrap();
        assert_eq!(joined, PathBuf::from("/var/log"));
    }

    #[test]
    fn test_smooth_join_relative_is_anchored() {
        let joined = smooth_join(["some", "relative"]).unwrap();
        assert!(joined.is_absolute());
        assert!(joined.ends_with("some/relative"));
    }

    #[test]
    fn test_running_dir_contains_exe() {
        let dir = running_dir().unwrap();
        assert!(dir.is_dir());
    }
}
