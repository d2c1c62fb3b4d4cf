//! hogkit core library
//!
//! Standalone helpers for filesystem bookkeeping, process introspection,
//! content hashing, string escaping and timestamped log fan-out. Every helper
//! is usable from Rust directly and from C/C# through the exported `hog_*`
//! entry points. Raw pointer arguments are null-checked before dereference.
//!
//! Nothing here is safe under concurrent invocation on the same directory:
//! `careful_delete` and `append_index` are check-then-act.

// All FFI entry points null-check before dereferencing.
#![allow(clippy::not_unsafe_ptr_arg_deref)]

use std::os::raw::c_char;

pub mod config;
pub mod error;
pub mod fs;
pub mod hash;
pub mod logging;
pub mod path;
pub mod process;
pub mod string;

pub use config::{LogConfig, StampForm};
pub use error::{Error, HogStatus, Result};
pub use fs::{append_index, careful_delete, AllowList, IndexedName};
pub use hash::{file_md5, file_sha256};
pub use logging::{print_and_log, time_stamp};
pub use path::smooth_join;
pub use process::{check_pid, dir_being_written_to};
pub use string::{escape_char, prepend, unescape, HogStringBuffer};

include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// Magic number for DLL verification ("HOGK")
pub const MAGIC_NUMBER: u32 = 0x484F_474B;

#[no_mangle]
pub extern "C" fn hog_core_version() -> *const c_char {
    VERSION_CSTR.as_ptr()
}

#[no_mangle]
pub extern "C" fn hog_core_test() -> u32 {
    MAGIC_NUMBER
}

/// Routes the library's `log` output through `env_logger` (`RUST_LOG`).
/// Returns 1 if this call installed the logger, 0 if one was already set.
#[no_mangle]
pub extern "C" fn hog_init_logging() -> i32 {
    match env_logger::try_init() {
        Ok(()) => 1,
        Err(_) => 0,
    }
}
