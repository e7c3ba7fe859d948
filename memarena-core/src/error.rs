use thiserror::Error;

/// Failures reported by [`Arena`](crate::alloc::Arena).
///
/// Every variant is recoverable: a failed call leaves the arena exactly as it
/// was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArenaError {
    #[error("Invalid arena capacity {requested} (must be positive)")]
    InvalidCapacity { requested: usize },

    #[error("Arena storage of {capacity} slots x {element_size} bytes cannot be allocated")]
    StorageTooLarge {
        capacity: usize,
        element_size: usize,
    },

    #[error("Arena capacity exceeded ({capacity} slots in use)")]
    CapacityExceeded { capacity: usize },
}

/// Failures reported by the zero-copy view helpers in [`view`](crate::view).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ViewError {
    /// The bytes are not valid UTF-8. `valid_up_to` is the length of the
    /// longest valid prefix; `error_len` is `None` when the input ends in the
    /// middle of a multi-byte sequence.
    #[error("Invalid UTF-8 encoding after {valid_up_to} bytes")]
    InvalidEncoding {
        valid_up_to: usize,
        error_len: Option<usize>,
    },
}

impl From<std::str::Utf8Error> for ViewError {
    fn from(err: std::str::Utf8Error) -> Self {
        ViewError::InvalidEncoding {
            valid_up_to: err.valid_up_to(),
            error_len: err.error_len(),
        }
    }
}
