//! Stamps the library version into `$OUT_DIR/version.rs`.
//!
//! `HOGKIT_BUILD_VERSION` overrides the package version, so release builds can
//! carry a tag or commit.

use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

const VERSION_VAR: &str = "HOGKIT_BUILD_VERSION";

fn main() -> io::Result<()> {
    println!("cargo:rerun-if-env-changed={VERSION_VAR}");

    let version = match env::var(VERSION_VAR) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_owned(),
        _ => format!("{}-dev", env!("CARGO_PKG_VERSION")),
    };
    if version.contains('\0') {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{VERSION_VAR} must not contain NUL"),
        ));
    }

    let out_dir = PathBuf::from(env::var_os("OUT_DIR").ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "OUT_DIR not set by cargo")
    })?);

    // Debug formatting yields a valid escaped literal for both string kinds.
    let generated = format!(
        "pub const VERSION: &str = {version:?};\n\
         pub const VERSION_CSTR: &::std::ffi::CStr = c{version:?};\n"
    );
    fs::write(out_dir.join("version.rs"), generated)
}
