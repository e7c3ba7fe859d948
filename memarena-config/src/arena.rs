//! Arena sizing parameters.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Upper bound on configured slots; keeps demo arenas from exhausting memory.
pub const MAX_CAPACITY: usize = 1 << 20;

/// Arena configuration.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ArenaConfig {
    /// Number of slots in the arena.
    #[validate(range(min = 1, max = 1048576))]
    pub capacity: usize,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self { capacity: 10 }
    }
}
