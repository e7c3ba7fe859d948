//! Borrowed text view over existing byte storage.

use std::fmt;
use std::ops::Deref;

/// A text view borrowing storage owned elsewhere.
///
/// Constructed by [`bytes_to_view`](super::bytes_to_view) after a single
/// UTF-8 check. The lifetime ties the view to the bytes it was built from, so
/// the borrow checker keeps that storage alive and unmodified while the view
/// exists.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StrView<'a>(&'a str);

impl<'a> StrView<'a> {
    #[inline]
    pub(crate) fn new(text: &'a str) -> Self {
        Self(text)
    }

    /// The viewed text, with the lifetime of the backing storage.
    #[inline]
    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// The same storage seen as bytes. Never copies.
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.0.as_bytes()
    }

    /// Length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Deref for StrView<'_> {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        self.0
    }
}

impl AsRef<str> for StrView<'_> {
    fn as_ref(&self) -> &str {
        self.0
    }
}

impl AsRef<[u8]> for StrView<'_> {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl PartialEq<str> for StrView<'_> {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for StrView<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl<'a> From<StrView<'a>> for &'a str {
    fn from(view: StrView<'a>) -> Self {
        view.0
    }
}

impl fmt::Display for StrView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl fmt::Debug for StrView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.0, f)
    }
}
