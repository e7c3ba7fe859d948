//! Zero-copy conversions between text and bytes.

use memarena_core::view::{bytes_to_view, view_to_bytes, SharedStr};
use memarena_core::ViewError;

/// Data pointers observed during the walkthrough.
#[derive(Debug, Clone, Copy)]
pub struct ViewReport {
    pub text_ptr: usize,
    pub bytes_ptr: usize,
    pub view_ptr: usize,
    /// A clone of a `SharedStr` points at the original's buffer.
    pub shared_clone_shares: bool,
    /// Non-UTF-8 input was rejected rather than viewed.
    pub rejected_invalid: bool,
}

impl ViewReport {
    pub fn zero_copy(&self) -> bool {
        self.text_ptr == self.bytes_ptr && self.bytes_ptr == self.view_ptr
    }
}

pub fn run_views(text: &str) -> Result<ViewReport, ViewError> {
    println!("Original text: {text} (data: {:p})", text.as_ptr());

    let bytes = view_to_bytes(text);
    println!("As bytes: {:?} (data: {:p})", bytes, bytes.as_ptr());

    let view = bytes_to_view(bytes)?;
    println!("Back to text: {view} (data: {:p})", view.as_ptr());

    let shared = SharedStr::from(text.to_owned());
    let clone = shared.clone();
    println!(
        "Shared text: {shared} (data: {:p}, clone: {:p})",
        shared.as_ptr(),
        clone.as_ptr()
    );

    let invalid = [b'o', b'k', 0xff];
    let rejected_invalid = match bytes_to_view(&invalid) {
        Ok(_) => false,
        Err(err) => {
            println!("Viewing {invalid:?} as text: {err}");
            true
        }
    };

    println!("Note: the data pointers match; nothing was copied.");

    Ok(ViewReport {
        text_ptr: text.as_ptr() as usize,
        bytes_ptr: bytes.as_ptr() as usize,
        view_ptr: view.as_ptr() as usize,
        shared_clone_shares: shared.as_ptr() == clone.as_ptr(),
        rejected_invalid,
    })
}
