//! Error types and status codes.
//!
//! `Error` is what the Rust API returns. `HogStatus` is its `#[repr(C)]`
//! projection for the exported C ABI.

use std::io;
use std::os::raw::c_char;
use std::path::{Path, PathBuf};

/// Result type for hogkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for hogkit operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Path does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Source file missing: {}", .0.display())]
    FileNotOnSource(PathBuf),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not supported on this platform: {0}")]
    Unsupported(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Attaches `path` to the I/O kinds callers are expected to act on.
    pub fn from_io(error: io::Error, path: &Path) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Error::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Error::PermissionDenied(path.to_path_buf()),
            _ => Error::Io(error),
        }
    }
}

/// Status codes returned across the C ABI.
///
/// 0 = success, non-zero = error.
///
/// # C# Mapping
/// ```csharp
/// public enum HogStatus : uint {
///     Success = 0,
///     InvalidArgument = 1,
///     NullPointer = 2,
///     // ...
/// }
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HogStatus {
    /// Operation completed successfully
    #[default]
    Success = 0,

    /// Invalid argument provided
    InvalidArgument = 1,

    /// Null pointer was passed where a valid pointer was required
    NullPointer = 2,

    /// Invalid UTF-8 encoding in string parameter
    InvalidUtf8 = 3,

    /// Path does not exist
    PathNotFound = 4,

    /// Permission denied accessing path or resource
    PermissionDenied = 5,

    /// I/O error during file operation
    IoError = 6,

    /// Path exists but is not a directory
    NotADirectory = 7,

    /// Feature not implemented on this platform
    NotImplemented = 10,

    /// JSON serialization/deserialization error
    JsonError = 12,
}

impl HogStatus {
    #[inline]
    pub fn is_success(self) -> bool {
        self == HogStatus::Success
    }

    #[inline]
    pub fn is_error(self) -> bool {
        self != HogStatus::Success
    }

    /// Converts an I/O error kind to the appropriate status code.
    pub fn from_io_error(error: &io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => HogStatus::PathNotFound,
            io::ErrorKind::PermissionDenied => HogStatus::PermissionDenied,
            io::ErrorKind::NotADirectory => HogStatus::NotADirectory,
            _ => HogStatus::IoError,
        }
    }

    /// Returns a human-readable description of this status.
    pub fn description(self) -> &'static str {
        self.description_cstr().trim_end_matches('\0')
    }

    fn description_cstr(self) -> &'static str {
        match self {
            HogStatus::Success => "Operation completed successfully\0",
            HogStatus::InvalidArgument => "Invalid argument provided\0",
            HogStatus::NullPointer => "Null pointer provided\0",
            HogStatus::InvalidUtf8 => "Invalid UTF-8 encoding\0",
            HogStatus::PathNotFound => "Path does not exist\0",
            HogStatus::PermissionDenied => "Permission denied\0",
            HogStatus::IoError => "I/O error\0",
            HogStatus::NotADirectory => "Not a directory\0",
            HogStatus::NotImplemented => "Not supported on this platform\0",
            HogStatus::JsonError => "JSON serialization error\0",
        }
    }
}

impl From<io::Error> for HogStatus {
    fn from(error: io::Error) -> Self {
        HogStatus::from_io_error(&error)
    }
}

impl From<&Error> for HogStatus {
    fn from(error: &Error) -> Self {
        match error {
            Error::NotFound(_) | Error::FileNotOnSource(_) => HogStatus::PathNotFound,
            Error::PermissionDenied(_) => HogStatus::PermissionDenied,
            Error::NotADirectory(_) => HogStatus::NotADirectory,
            Error::InvalidArgument(_) => HogStatus::InvalidArgument,
            Error::Unsupported(_) => HogStatus::NotImplemented,
            Error::Io(e) => HogStatus::from_io_error(e),
            Error::Walk(e) => e
                .io_error()
                .map(HogStatus::from_io_error)
                .unwrap_or(HogStatus::IoError),
            Error::Serialization(_) => HogStatus::JsonError,
        }
    }
}

// FFI Exports

/// Returns a human-readable description of a status code.
///
/// # Safety
/// The returned pointer is static. Do not free it.
#[no_mangle]
pub extern "C" fn hog_status_description(status: HogStatus) -> *const c_char {
    status.description_cstr().as_ptr() as *const c_char
}
