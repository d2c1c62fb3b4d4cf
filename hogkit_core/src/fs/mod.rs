//! Filesystem bookkeeping with FFI exports.

use std::os::raw::c_char;
use std::path::Path;

use crate::error::HogStatus;
use crate::string::{c_str_to_str, HogStringBuffer};

pub mod delete;
pub mod index;
pub mod ops;

pub use delete::{careful_delete, find_disallowed, AllowList};
pub use index::{append_index, IndexedName};
pub use ops::{
    dirs_match, immediate_subdirs, make_file, mod_time, transfer_file, TransferMode,
    DEFAULT_IGNORE, DUMMY_CONTENT,
};

/// Outcome of `hog_careful_delete`.
///
/// `deleted == false` with `status == Success` means the folder held a file
/// outside the allow-list and was left alone.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct HogDeleteResult {
    pub status: HogStatus,
    pub deleted: bool,
}

impl HogDeleteResult {
    fn error(status: HogStatus) -> Self {
        Self { status, deleted: false }
    }
}

/// Deletes `folder` if every file in it starts with one of the characters in
/// `allowed`.
///
/// # Safety
/// - `folder` and `allowed` must be null or valid null-terminated UTF-8 strings
#[no_mangle]
pub unsafe extern "C" fn hog_careful_delete(
    folder: *const c_char,
    allowed: *const c_char,
) -> HogDeleteResult {
    let folder = match c_str_to_str(folder) {
        Ok(s) => s,
        Err(e) => return HogDeleteResult::error(e),
    };
    let allowed = match c_str_to_str(allowed) {
        Ok(s) => AllowList::from(s),
        Err(e) => return HogDeleteResult::error(e),
    };

    match careful_delete(folder, &allowed) {
        Ok(deleted) => HogDeleteResult { status: HogStatus::Success, deleted },
        Err(e) => {
            log::warn!("careful delete of {} failed: {}", folder, e);
            HogDeleteResult::error(HogStatus::from(&e))
        }
    }
}

/// Returns the next free `base(n)ext` path inside `dir`.
///
/// # Safety
/// - All arguments must be null or valid null-terminated UTF-8 strings
/// - The returned buffer must be freed with `hog_free_string_buffer`
#[no_mangle]
pub unsafe extern "C" fn hog_append_index(
    base: *const c_char,
    ext: *const c_char,
    dir: *const c_char,
) -> HogStringBuffer {
    let base = match c_str_to_str(base) {
        Ok(s) => s,
        Err(e) => return HogStringBuffer::error(e),
    };
    let ext = match c_str_to_str(ext) {
        Ok(s) => s,
        Err(e) => return HogStringBuffer::error(e),
    };
    let dir = match c_str_to_str(dir) {
        Ok(s) => s,
        Err(e) => return HogStringBuffer::error(e),
    };

    match append_index(base, ext, Path::new(dir)) {
        Ok(path) => match path.to_str() {
            Some(s) => HogStringBuffer::from_string(s),
            None => HogStringBuffer::error(HogStatus::InvalidUtf8),
        },
        Err(e) => HogStringBuffer::error(HogStatus::from(&e)),
    }
}
