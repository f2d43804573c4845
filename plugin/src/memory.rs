//! String and buffer handling at the C boundary
//!
//! Memory the host frees through `ts3plugin_freeMemory` is allocated with
//! `libc::malloc` here and released with `libc::free` there.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use poke_blocker_shared::HostError;

/// Build a C string, failing on interior NUL bytes
pub fn to_c_string(value: &str) -> Result<CString, HostError> {
    CString::new(value).map_err(|_| HostError::InteriorNul)
}

/// Build a C string, cutting `value` at its first NUL byte
pub fn to_c_string_truncated(value: &str) -> CString {
    let end = value.find('\0').unwrap_or(value.len());
    CString::new(&value[..end]).unwrap_or_default()
}

/// Copy a host string into an owned `String`, replacing invalid UTF-8.
/// A null pointer reads as the empty string.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that stays valid
/// for the duration of the call.
pub unsafe fn read_c_str_lossy(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    CStr::from_ptr(ptr).to_string_lossy().into_owned()
}

/// Copy a host string into an owned `String`.
///
/// # Safety
/// Same as [`read_c_str_lossy`].
pub unsafe fn read_c_str(ptr: *const c_char) -> Result<String, HostError> {
    if ptr.is_null() {
        return Ok(String::new());
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map(str::to_owned)
        .map_err(|_| HostError::InvalidUtf8)
}

/// Copy `value` into a fixed-size C buffer, truncating so the result is
/// always NUL-terminated.
pub fn copy_to_buf(dst: &mut [c_char], value: &str) {
    if dst.is_empty() {
        return;
    }
    let bytes = value.as_bytes();
    let len = bytes
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(bytes.len())
        .min(dst.len() - 1);
    for (slot, &byte) in dst.iter_mut().zip(&bytes[..len]) {
        *slot = byte as c_char;
    }
    dst[len] = 0;
}

/// Read a NUL-terminated string back out of a fixed-size buffer
pub fn read_buf(buf: &[c_char]) -> String {
    let bytes: Vec<u8> = buf
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Allocate a NUL-terminated copy of `value` with `malloc`.
/// Returns null if the allocation fails.
pub fn malloc_c_string(value: &str) -> *mut c_char {
    let c_value = to_c_string_truncated(value);
    let bytes = c_value.as_bytes_with_nul();
    // SAFETY: the destination is freshly allocated with room for `bytes`.
    unsafe {
        let dst = libc::malloc(bytes.len()) as *mut c_char;
        if dst.is_null() {
            return ptr::null_mut();
        }
        ptr::copy_nonoverlapping(bytes.as_ptr() as *const c_char, dst, bytes.len());
        dst
    }
}
