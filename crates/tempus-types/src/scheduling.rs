//! Priority levels and shutdown disciplines

use serde::{Deserialize, Serialize};

/// Job priority levels
///
/// Priority only orders jobs whose earliest-run instants tie; it never lets
/// a later job overtake one that is already due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Low = 0,
    Normal = 1,
    High = 2,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Normal
    }
}

/// Shutdown disciplines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShutdownMode {
    /// Stop accepting new jobs, drain every pending job, then stop workers
    Graceful,
    /// Stop accepting new jobs, drop every pending job, stop workers
    /// (jobs already executing still run to completion)
    Immediate,
}
