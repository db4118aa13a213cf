//! Availability statistics.
//!
//! Two deliberately separate calculations live here: the exact interval
//! calculator over outage windows (range report) and the averaged
//! aggregator over pre-computed availability samples (daily report).
//! They answer the same question with different inputs and are not
//! expected to agree for the same device and range.

mod aggregate;
mod interval;

pub use aggregate::*;
pub use interval::*;

/// A monitored device snapshot. Identity is the numeric id.
#[derive(Debug, Clone)]
pub struct Device {
    pub id: i64,
    pub hostname: String,
    pub ip: String,
    pub sysname: String,
    pub enrollment_date: String,
}

/// A recorded outage interval for a device.
///
/// `up_at == None` means the device was still down when the data was
/// retrieved. Invariant: `down_at <= up_at` when `up_at` is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutageWindow {
    pub down_at: i64,
    pub up_at: Option<i64>,
}

/// A pre-aggregated availability measurement from the monitoring API.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilitySample {
    pub timestamp: i64,
    pub percentage: f64,
}

/// Inclusive query range in UTC epoch seconds, `start <= end`.
#[derive(Debug, Clone, Copy)]
pub struct QueryRange {
    pub start: i64,
    pub end: i64,
}

impl QueryRange {
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

/// Result of the exact-range calculation for one device.
#[derive(Debug, Clone)]
pub struct DeviceReport {
    pub device: Device,
    pub percentage: f64,
    pub downtime_seconds: i64,
}
