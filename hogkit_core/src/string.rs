//! String escaping helpers and the string buffer used by the C ABI.
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use crate::error::HogStatus;

/// Puts a backslash in front of every occurrence of `ch`.
///
/// ```
/// assert_eq!(hogkit_core::escape_char("brickly manhang", 'a'), "brickly m\\anh\\ang");
/// ```
pub fn escape_char(from: &str, ch: char) -> String {
    let mut out = String::with_capacity(from.len());
    for c in from.chars() {
        if c == ch {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Removes every backslash. Not an exact inverse of `escape_char` when the
/// input already held backslashes.
pub fn unescape(from: &str) -> String {
    from.replace('\\', "")
}

/// `pre + post`, or just `post` when there is no prefix.
pub fn prepend(pre: Option<&str>, post: &str) -> String {
    match pre {
        Some(pre) => format!("{}{}", pre, post),
        None => post.to_string(),
    }
}

#[repr(C)]
#[derive(Debug)]
pub struct HogStringBuffer {
    pub status: HogStatus,
    pub data: *mut c_char,
    pub length: usize,
}

impl HogStringBuffer {
    pub fn from_string(s: &str) -> Self {
        match CString::new(s) {
            Ok(c_string) => {
                let len = c_string.as_bytes().len();
                Self { status: HogStatus::Success, data: c_string.into_raw(), length: len }
            }
            Err(_) => Self::error(HogStatus::InvalidUtf8),
        }
    }
    pub fn error(status: HogStatus) -> Self {
        Self { status, data: std::ptr::null_mut(), length: 0 }
    }
    pub fn null() -> Self {
        Self::error(HogStatus::NullPointer)
    }
    pub fn is_valid(&self) -> bool {
        self.status.is_success() && !self.data.is_null()
    }
}

impl Default for HogStringBuffer {
    fn default() -> Self { Self::null() }
}

#[no_mangle]
pub extern "C" fn hog_free_string_buffer(buffer: *mut HogStringBuffer) {
    if !buffer.is_null() {
        let buf = unsafe { &mut *buffer };
        if !buf.data.is_null() {
            unsafe { let _ = CString::from_raw(buf.data); }
            buf.data = std::ptr::null_mut();
            buf.length = 0;
        }
    }
}

/// # Safety
/// `input` must be null or a valid null-terminated C string.
#[no_mangle]
pub unsafe extern "C" fn hog_escape_char(input: *const c_char, ch: u32) -> HogStringBuffer {
    let Some(ch) = char::from_u32(ch) else {
        return HogStringBuffer::error(HogStatus::InvalidArgument);
    };
    match c_str_to_str(input) {
        Ok(s) => HogStringBuffer::from_string(&escape_char(s, ch)),
        Err(status) => HogStringBuffer::error(status),
    }
}

/// # Safety
/// `input` must be null or a valid null-terminated C string.
#[no_mangle]
pub unsafe extern "C" fn hog_unescape(input: *const c_char) -> HogStringBuffer {
    match c_str_to_str(input) {
        Ok(s) => HogStringBuffer::from_string(&unescape(s)),
        Err(status) => HogStringBuffer::error(status),
    }
}

/// Borrows a C string, rejecting null and non-UTF-8 input.
///
/// # Safety
/// `ptr` must be null or a valid null-terminated C string that outlives `'a`.
pub unsafe fn c_str_to_str<'a>(ptr: *const c_char) -> Result<&'a str, HogStatus> {
    if ptr.is_null() {
        return Err(HogStatus::NullPointer);
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map_err(|_| HogStatus::InvalidUtf8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_char() {
        assert_eq!(escape_char("brickly manhang", 'a'), "brickly m\\anh\\ang");
        assert_eq!(escape_char("no match", 'z'), "no match");
        assert_eq!(escape_char("", 'a'), "");
    }

    #[test]
    fn test_escape_multibyte() {
        assert_eq!(escape_char("café café", 'é'), "caf\\é caf\\é");
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape("brickly m\\anh\\ang"), "brickly manhang");
        assert_eq!(unescape("a\\\\b"), "ab");
    }

    #[test]
    fn test_prepend() {
        assert_eq!(prepend(Some("dis"), "co"), "disco");
        assert_eq!(prepend(None, "buttress"), "buttress");
        assert_eq!(prepend(Some(""), "x"), "x");
    }

    #[test]
    fn test_buffer_roundtrip() {
        let mut buf = HogStringBuffer::from_string("hello");
        assert!(buf.is_valid());
        assert_eq!(buf.length, 5);
        let s = unsafe { CStr::from_ptr(buf.data) }.to_str().unwrap();
        assert_eq!(s, "hello");
        hog_free_string_buffer(&mut buf);
        assert!(buf.data.is_null());
    }

    #[test]
    fn test_buffer_interior_nul() {
        let buf = HogStringBuffer::from_string("a\0b");
        assert_eq!(buf.status, HogStatus::InvalidUtf8);
        assert!(!buf.is_valid());
    }
}
