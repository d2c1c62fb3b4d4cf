//! File content hashing.
//!
//! Files are streamed through the digest in fixed-size chunks, so large files
//! never need to fit in memory.

use std::fs::File;
use std::io::Read;
use std::os::raw::c_char;
use std::path::Path;

use md5::Md5;
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::string::{c_str_to_str, HogStringBuffer};
use crate::HogStatus;

/// Read size used by `file_md5` and `file_sha256`.
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

fn digest_file<D: Digest>(path: &Path, chunk_size: usize) -> Result<String> {
    if chunk_size == 0 {
        return Err(Error::InvalidArgument("chunk size must be non-zero".to_string()));
    }
    let mut file = File::open(path).map_err(|e| Error::from_io(e, path))?;
    let mut hasher = D::new();
    let mut chunk = vec![0u8; chunk_size];
    loop {
        let read = file.read(&mut chunk)?;
        if read == 0 {
            break;
        }
        hasher.update(&chunk[..read]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Lower-case hex MD5 of the file at `path`.
pub fn file_md5(path: impl AsRef<Path>) -> Result<String> {
    file_md5_chunked(path, DEFAULT_CHUNK_SIZE)
}

pub fn file_md5_chunked(path: impl AsRef<Path>, chunk_size: usize) -> Result<String> {
    digest_file::<Md5>(path.as_ref(), chunk_size)
}

/// Lower-case hex SHA-256 of the file at `path`.
pub fn file_sha256(path: impl AsRef<Path>) -> Result<String> {
    digest_file::<Sha256>(path.as_ref(), DEFAULT_CHUNK_SIZE)
}

// ============================================================================
// FFI Implementation
// ============================================================================

/// # Safety
/// - `path` must be null or a valid null-terminated UTF-8 string
/// - The returned buffer must be freed with `hog_free_string_buffer`
#[no_mangle]
pub unsafe extern "C" fn hog_file_md5(path: *const c_char) -> HogStringBuffer {
    let path = match c_str_to_str(path) {
        Ok(s) => s,
        Err(status) => return HogStringBuffer::error(status),
    };
    match file_md5(path) {
        Ok(hash) => HogStringBuffer::from_string(&hash),
        Err(e) => HogStringBuffer::error(HogStatus::from(&e)),
    }
}
