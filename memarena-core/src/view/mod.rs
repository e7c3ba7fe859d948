//! ## memarena-core::view
//! **Zero-copy reinterpretation between bytes and text**
//!
//! Views re-type existing storage without copying. Validity is established
//! once, at construction: [`bytes_to_view`] checks UTF-8 and fails with
//! [`ViewError::InvalidEncoding`] instead of producing an ill-formed string.
//! The opposite direction, [`view_to_bytes`], cannot fail and only hands out
//! a shared borrow, so text can never be mutated through its byte view.
//!
//! ### Key Submodules:
//! - `str_view/`: [`StrView`], a borrowed view tied to its storage
//! - `shared/`: [`SharedStr`], validated text over a shared `Bytes` buffer

mod shared;
mod str_view;

pub use shared::SharedStr;
pub use str_view::StrView;

use tracing::debug;

use crate::error::ViewError;

/// Views `bytes` as text without copying.
///
/// # Errors
///
/// [`ViewError::InvalidEncoding`] if `bytes` is not valid UTF-8.
#[inline]
pub fn bytes_to_view(bytes: &[u8]) -> Result<StrView<'_>, ViewError> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(StrView::new(text)),
        Err(err) => {
            debug!(
                len = bytes.len(),
                valid_up_to = err.valid_up_to(),
                "rejected non-UTF-8 view"
            );
            Err(err.into())
        }
    }
}

/// Views `bytes` as text without checking the encoding.
///
/// # Safety
///
/// `bytes` must be valid UTF-8. Prefer [`bytes_to_view`] unless the content
/// has already been validated.
#[inline]
pub unsafe fn bytes_to_view_unchecked(bytes: &[u8]) -> StrView<'_> {
    StrView::new(std::str::from_utf8_unchecked(bytes))
}

/// Views text as its UTF-8 bytes without copying.
#[inline]
pub fn view_to_bytes(view: &str) -> &[u8] {
    view.as_bytes()
}

/// Views the text stored in a fixed-size, NUL-padded buffer.
///
/// The text ends at the first NUL byte, or at the end of `buf` if there is
/// none.
pub fn fixed_str(buf: &[u8]) -> Result<StrView<'_>, ViewError> {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    bytes_to_view(&buf[..end])
}

/// Stores `text` in a fixed-size buffer and NUL-pads the remainder.
///
/// Text longer than `buf` is truncated at the last character boundary that
/// fits. Returns the number of text bytes written. A NUL inside `text` ends
/// the value as seen by [`fixed_str`].
pub fn write_fixed_str(buf: &mut [u8], text: &str) -> usize {
    let mut len = text.len().min(buf.len());
    while !text.is_char_boundary(len) {
        len -= 1;
    }
    buf[..len].copy_from_slice(&text.as_bytes()[..len]);
    buf[len..].fill(0);
    len
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tracing_test::traced_test;

    #[test]
    fn test_bytes_to_view_shares_storage() {
        let bytes = b"Hello, World!".to_vec();
        let view = bytes_to_view(&bytes).unwrap();
        assert_eq!(view, "Hello, World!");
        assert_eq!(view.as_ptr(), bytes.as_ptr());
    }

    #[test]
    fn test_round_trip_keeps_address() {
        let text = String::from("Hello, Unsafe World!");
        let bytes = view_to_bytes(&text);
        let view = bytes_to_view(bytes).unwrap();

        assert_eq!(bytes.as_ptr(), text.as_ptr());
        assert_eq!(view.as_ptr(), text.as_ptr());
        assert_eq!(view_to_bytes(&view), text.as_bytes());
    }

    #[traced_test]
    #[test]
    fn test_invalid_encoding_is_reported() {
        let err = bytes_to_view(&[b'a', 0xff]).unwrap_err();
        assert_eq!(
            err,
            ViewError::InvalidEncoding {
                valid_up_to: 1,
                error_len: Some(1)
            }
        );
        assert!(logs_contain("rejected non-UTF-8 view"));
    }

    #[test]
    fn test_unchecked_view() {
        let bytes = "ok".as_bytes();
        // Safety: the bytes come from a `&str`.
        let view = unsafe { bytes_to_view_unchecked(bytes) };
        assert_eq!(view, "ok");
    }

    #[test]
    fn test_empty_views() {
        assert!(bytes_to_view(&[]).unwrap().is_empty());
        assert!(view_to_bytes("").is_empty());
        assert!(fixed_str(&[0; 8]).unwrap().is_empty());
    }

    #[test]
    fn test_fixed_str_round_trip() {
        let mut name = [0xaa_u8; 16];
        assert_eq!(write_fixed_str(&mut name, "Item-3"), 6);
        assert_eq!(fixed_str(&name).unwrap(), "Item-3");
        assert!(name[6..].iter().all(|&b| b == 0));

        // No terminator: the whole buffer is the value.
        let full = *b"0123456789abcdef";
        assert_eq!(fixed_str(&full).unwrap().len(), 16);
    }

    #[test]
    fn test_write_fixed_str_truncates_on_char_boundary() {
        let mut buf = [0u8; 4];
        // "aéé" is 5 bytes; the second 'é' does not fit.
        assert_eq!(write_fixed_str(&mut buf, "aéé"), 3);
        assert_eq!(fixed_str(&buf).unwrap(), "aé");
    }

    proptest! {
        #[test]
        fn prop_round_trip_is_identity(text in any::<String>()) {
            let bytes = text.as_bytes();
            let view = bytes_to_view(bytes).unwrap();
            prop_assert_eq!(view_to_bytes(&view), bytes);
            prop_assert_eq!(view.as_ptr(), bytes.as_ptr());
        }

        #[test]
        fn prop_fixed_str_never_splits_chars(text in "\\PC{0,12}", cap in 0usize..24) {
            let mut buf = vec![0u8; cap];
            let written = write_fixed_str(&mut buf, &text);
            prop_assert!(written <= cap);
            prop_assert!(text.is_char_boundary(written));
            if !text[..written].contains('\0') {
                prop_assert_eq!(fixed_str(&buf).unwrap().as_str(), &text[..written]);
            }
        }
    }
}
