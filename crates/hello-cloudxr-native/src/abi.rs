//! Strings as they cross the C ABI.

use std::ffi::c_char;
use std::marker::PhantomData;

/// A borrowed UTF-8 string passed as pointer and byte length.
///
/// Not NUL-terminated, so embedded NULs reach the other side intact.
#[derive(Debug, Clone, Copy)]
pub struct StrView<'a> {
    data: *const c_char,
    len: usize,
    _text: PhantomData<&'a str>,
}

impl<'a> StrView<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            data: text.as_ptr().cast(),
            len: text.len(),
            _text: PhantomData,
        }
    }

    pub fn data(self) -> *const c_char {
        self.data
    }

    pub fn len(self) -> usize {
        self.len
    }

    pub fn is_empty(self) -> bool {
        self.len == 0
    }

    /// The bytes the receiver reads back.
    #[allow(unsafe_code)]
    pub fn as_bytes(self) -> &'a [u8] {
        // SAFETY: built from a `&'a str` of exactly `len` bytes.
        unsafe { std::slice::from_raw_parts(self.data.cast(), self.len) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_nul_preserved() {
        let text = "-s 10.0.0.1\0--trailing";
        let view = StrView::new(text);

        assert_eq!(view.len(), text.len());
        assert_eq!(view.as_bytes(), text.as_bytes());
    }

    #[test]
    fn test_multibyte_text_is_byte_identical() {
        let text = "ünïcödé ☃ 日本語";
        let view = StrView::new(text);

        assert_eq!(view.len(), text.len());
        assert_eq!(std::str::from_utf8(view.as_bytes()).unwrap(), text);
    }

    #[test]
    fn test_empty_string() {
        let view = StrView::new("");

        assert!(view.is_empty());
        assert!(!view.data().is_null());
        assert!(view.as_bytes().is_empty());
    }
}
