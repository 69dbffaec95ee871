//! Vehicle-telemetry producer for the tempus scheduler
//!
//! Parses `id,timestamp,speed,engine-flag,error-code` lines and submits each
//! record as a scheduled job, translating the blank-line sentinel into a
//! graceful shutdown of the scheduler it feeds.

pub mod feeder;
pub mod record;

// Re-export public API
pub use feeder::{FeedSummary, Feeder, RecordHandler};
pub use record::{parse_line, EngineStatus, ParsedLine, VehicleRecord};
