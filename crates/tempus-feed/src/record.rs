//! Vehicle telemetry records and line parsing
//!
//! The feed format is one record per line:
//! `vehicle-id,timestamp,speed,engine-flag,error-code`, with an ISO 8601
//! timestamp. A blank line is the termination sentinel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempus_types::{Result, TempusError};

/// Engine status codes carried by a telemetry record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineStatus {
    Ok,
    SensorFailure,
    Overheat,
    Unknown,
}

impl EngineStatus {
    /// Map the upstream token set onto a status code. Unrecognized tokens
    /// are data, not errors: they become `Unknown`.
    fn from_token(token: &str) -> Self {
        match token {
            "ENGINE_OK" | "OK" => Self::Ok,
            "ENGINE_OVERHEAT" => Self::Overheat,
            "SENSOR_FAILURE" | "ENGINE_SENSOR_FAIL" => Self::SensorFailure,
            _ => Self::Unknown,
        }
    }

    /// Whether the record reports a fault
    pub fn is_fault(&self) -> bool {
        !matches!(self, Self::Ok)
    }
}

/// One parsed telemetry line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub vehicle_id: u32,
    pub timestamp: DateTime<Utc>,
    pub speed: f64,
    pub engine_on: bool,
    pub error_code: EngineStatus,
}

/// Outcome of parsing one line of the feed
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine {
    Record(VehicleRecord),
    /// Blank line: the producer is done; drain and stop
    Sentinel,
}

/// Parse one feed line.
///
/// Malformed lines return [`TempusError::InvalidFormat`]; the feeder logs
/// and counts them without aborting the run.
pub fn parse_line(line: &str) -> Result<ParsedLine> {
    if line.trim().is_empty() {
        return Ok(ParsedLine::Sentinel);
    }

    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != 5 {
        return Err(TempusError::invalid_format(format!(
            "expected 5 fields, got {}",
            fields.len()
        )));
    }

    let vehicle_id = fields[0]
        .parse::<u32>()
        .map_err(|err| TempusError::invalid_format(format!("vehicle id: {err}")))?;
    let timestamp = DateTime::parse_from_rfc3339(fields[1])
        .map_err(|err| TempusError::invalid_format(format!("timestamp: {err}")))?
        .with_timezone(&Utc);
    let speed = fields[2]
        .parse::<f64>()
        .map_err(|err| TempusError::invalid_format(format!("speed: {err}")))?;
    let engine_on = match fields[3] {
        "1" | "ON" | "ENGINE_OK" => true,
        "0" | "OFF" => false,
        other => {
            return Err(TempusError::invalid_format(format!(
                "engine flag: {other:?}"
            )))
        }
    };
    let error_code = EngineStatus::from_token(fields[4]);

    Ok(ParsedLine::Record(VehicleRecord {
        vehicle_id,
        timestamp,
        speed,
        engine_on,
        error_code,
    }))
}
