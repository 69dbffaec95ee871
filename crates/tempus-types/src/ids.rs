//! Identifier types for scheduler entities

use serde::{Deserialize, Serialize};
use std::fmt;

/// Job identifier
///
/// Issued by a scheduler-owned counter that starts at 1 and increments on
/// every accepted submission. Ids are strictly increasing and never reused
/// within a scheduler instance's lifetime, so they stay valid as lookup
/// keys (for cancellation) until the scheduler is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JobId(pub u64);

impl JobId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for JobId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}
