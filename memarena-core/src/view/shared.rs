//! Reference-counted text over a `bytes::Bytes` buffer.

use std::fmt;
use std::ops::{Deref, Range};

use bytes::Bytes;

use super::StrView;
use crate::error::ViewError;

/// Text backed by a shared [`Bytes`] buffer.
///
/// The buffer is checked for UTF-8 exactly once, in
/// [`from_bytes`](Self::from_bytes). `Bytes` is immutable, so the check holds
/// for the life of the value; clones and [`slice`](Self::slice)s share the
/// same allocation.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SharedStr {
    bytes: Bytes,
}

impl SharedStr {
    /// Validates `bytes` as UTF-8 and wraps it without copying.
    pub fn from_bytes(bytes: Bytes) -> Result<Self, ViewError> {
        std::str::from_utf8(&bytes)?;
        Ok(Self { bytes })
    }

    pub const fn from_static(text: &'static str) -> Self {
        Self {
            bytes: Bytes::from_static(text.as_bytes()),
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        // Safety: validated in the constructors and `Bytes` never mutates.
        unsafe { std::str::from_utf8_unchecked(&self.bytes) }
    }

    #[inline]
    pub fn as_view(&self) -> StrView<'_> {
        StrView::new(self.as_str())
    }

    /// Zero-copy sub-string. `None` if `range` is out of bounds or does not
    /// fall on character boundaries.
    pub fn slice(&self, range: Range<usize>) -> Option<Self> {
        let text = self.as_str();
        if range.start > range.end
            || !text.is_char_boundary(range.start)
            || !text.is_char_boundary(range.end)
        {
            return None;
        }
        Some(Self {
            bytes: self.bytes.slice(range),
        })
    }

    /// Releases the underlying buffer.
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

impl TryFrom<Bytes> for SharedStr {
    type Error = ViewError;

    fn try_from(bytes: Bytes) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl From<SharedStr> for Bytes {
    fn from(text: SharedStr) -> Self {
        text.bytes
    }
}

impl From<String> for SharedStr {
    fn from(text: String) -> Self {
        Self {
            bytes: Bytes::from(text),
        }
    }
}

impl Deref for SharedStr {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for SharedStr {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SharedStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for SharedStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}
