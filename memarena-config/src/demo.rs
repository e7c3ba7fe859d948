//! Parameters for the demonstration scenario.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation;

/// Demonstration scenario configuration.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DemoConfig {
    /// Records allocated before the arena is filled to capacity.
    #[validate(range(min = 1))]
    pub first_batch: usize,

    /// Records allocated after the reset.
    #[validate(range(min = 1))]
    pub post_reset_batch: usize,

    /// Text used by the zero-copy view demonstration.
    #[validate(length(min = 1, max = 4096))]
    #[validate(custom(function = validation::validate_no_nul))]
    pub text: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            first_batch: 5,
            post_reset_batch: 3,
            text: "Hello, Unsafe World!".into(),
        }
    }
}
