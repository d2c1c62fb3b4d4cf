//! Process introspection
//!
//! Liveness checks by pid, and detection of processes holding write handles
//! on files below a directory.

use std::os::raw::c_char;
use std::path::Path;

use crate::error::{Error, Result};
use crate::string::c_str_to_str;

/// Whether a process with `pid` is running.
///
/// On Unix this sends signal 0, which performs the permission and existence
/// checks without delivering anything. A process owned by another user
/// (`EPERM`) still counts as alive.
#[cfg(unix)]
pub fn check_pid(pid: u32) -> Result<bool> {
    // 0 and negative values address process groups, not a single process.
    let raw = match libc::pid_t::try_from(pid) {
        Ok(raw) if raw > 0 => raw,
        _ => return Err(Error::InvalidArgument(format!("not a process id: {}", pid))),
    };

    if unsafe { libc::kill(raw, 0) } == 0 {
        return Ok(true);
    }
    let err = std::io::Error::last_os_error();
    match err.raw_os_error() {
        Some(libc::ESRCH) => Ok(false),
        Some(libc::EPERM) => Ok(true),
        _ => Err(Error::Io(err)),
    }
}

#[cfg(not(unix))]
pub fn check_pid(pid: u32) -> Result<bool> {
    use sysinfo::{Pid, ProcessesToUpdate, System};

    if pid == 0 {
        return Err(Error::InvalidArgument(format!("not a process id: {}", pid)));
    }
    let mut sys = System::new();
    sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]), true);
    Ok(sys.process(Pid::from_u32(pid)).is_some())
}

/// Access mode bits of the octal `flags:` line in a `/proc/<pid>/fdinfo/<fd>`
/// file. Returns true for `O_WRONLY` and `O_RDWR`.
pub fn fdinfo_is_writable(fdinfo: &str) -> Option<bool> {
    const O_ACCMODE: u32 = 0o3;
    const O_WRONLY: u32 = 0o1;
    const O_RDWR: u32 = 0o2;

    let flags = fdinfo
        .lines()
        .find_map(|line| line.strip_prefix("flags:"))
        .and_then(|value| u32::from_str_radix(value.trim(), 8).ok())?;
    let mode = flags & O_ACCMODE;
    Some(mode == O_WRONLY || mode == O_RDWR)
}

/// Whether any process currently holds a file under `path` open for writing.
///
/// Walks `/proc/*/fd`, resolving each descriptor link and reading its access
/// mode from `fdinfo`. Processes that exit mid-scan or whose descriptors are
/// unreadable (other users, without privileges) are skipped.
#[cfg(target_os = "linux")]
pub fn dir_being_written_to(path: impl AsRef<Path>) -> Result<bool> {
    use std::fs;

    let path = path.as_ref();
    let root = dunce::canonicalize(path).map_err(|e| Error::from_io(e, path))?;

    for proc_entry in fs::read_dir("/proc")? {
        let Ok(proc_entry) = proc_entry else { continue };
        let pid_name = proc_entry.file_name();
        let Some(pid) = pid_name.to_str().filter(|s| s.bytes().all(|b| b.is_ascii_digit())) else {
            continue;
        };

        let fd_dir = proc_entry.path().join("fd");
        let Ok(fds) = fs::read_dir(&fd_dir) else { continue };
        for fd in fds.flatten() {
            let Ok(target) = fs::read_link(fd.path()) else { continue };
            if !target.starts_with(&root) {
                continue;
            }
            let fdinfo = proc_entry.path().join("fdinfo").join(fd.file_name());
            let Ok(info) = fs::read_to_string(&fdinfo) else { continue };
            if fdinfo_is_writable(&info) == Some(true) {
                log::debug!("pid {} is writing to {}", pid, target.display());
                return Ok(true);
            }
        }
    }
    Ok(false)
}

#[cfg(not(target_os = "linux"))]
pub fn dir_being_written_to(path: impl AsRef<Path>) -> Result<bool> {
    let _ = path;
    Err(Error::Unsupported("open handle inspection requires /proc"))
}

// ============================================================================
// FFI Implementation
// ============================================================================

fn bool_to_ffi(result: Result<bool>) -> i32 {
    match result {
        Ok(true) => 1,
        Ok(false) => 0,
        Err(e) => {
            log::warn!("{}", e);
            -1
        }
    }
}

/// Returns 1 if `pid` is alive, 0 if not, -1 on error.
#[no_mangle]
pub extern "C" fn hog_check_pid(pid: u32) -> i32 {
    bool_to_ffi(check_pid(pid))
}

/// Returns 1 if something is writing under `path`, 0 if not, -1 on error.
///
/// # Safety
/// `path` must be null or a valid null-terminated UTF-8 string.
#[no_mangle]
pub unsafe extern "C" fn hog_dir_being_written_to(path: *const c_char) -> i32 {
    match c_str_to_str(path) {
        Ok(path) => bool_to_ffi(dir_being_written_to(path)),
        Err(_) => -1,
    }
}
