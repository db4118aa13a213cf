//! Monitoring API response models.

use serde::Deserialize;
use serde_json::Value;

use crate::stats::{AvailabilitySample, Device, OutageWindow};

/// Response of `GET {base}/devices`.
#[derive(Debug, Deserialize)]
pub struct DevicesResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub devices: Vec<ApiDevice>,
}

/// One device entry as returned by the API.
#[derive(Debug, Deserialize)]
pub struct ApiDevice {
    pub device_id: i64,
    pub hostname: String,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default, alias = "sysName")]
    pub sysname: Option<String>,
    #[serde(default)]
    pub inserted: Option<String>,
}

impl ApiDevice {
    /// Normalized sysname: some API versions prefix the value with
    /// "sysName:"; strip it, trim, and fall back to the hostname when
    /// nothing is left.
    fn clean_sysname(&self) -> String {
        let raw = self.sysname.as_deref().unwrap_or("");
        let cleaned = raw.strip_prefix("sysName:").unwrap_or(raw).trim();
        if cleaned.is_empty() {
            self.hostname.clone()
        } else {
            cleaned.to_string()
        }
    }

    pub fn into_device(self) -> Device {
        let sysname = self.clean_sysname();
        Device {
            id: self.device_id,
            hostname: self.hostname,
            ip: self.ip.unwrap_or_default(),
            sysname,
            enrollment_date: self.inserted.unwrap_or_default(),
        }
    }
}

/// Response of `GET {base}/devices/{id}/outages`.
#[derive(Debug, Deserialize)]
pub struct OutagesResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub outages: Vec<RawOutage>,
}

/// One outage entry; `up_again` is null while the device is still down.
#[derive(Debug, Deserialize)]
pub struct RawOutage {
    pub going_down: i64,
    #[serde(default)]
    pub up_again: Option<i64>,
}

impl From<RawOutage> for OutageWindow {
    fn from(raw: RawOutage) -> Self {
        OutageWindow {
            down_at: raw.going_down,
            up_at: raw.up_again,
        }
    }
}

/// Response of `GET {base}/devices/{id}/availability`.
#[derive(Debug, Deserialize)]
pub struct AvailabilityResponse {
    #[serde(default)]
    pub availability: Vec<RawSample>,
}

/// One availability entry. The API is loose with types here: `timestamp`
/// and `availability_perc` may arrive as numbers or strings, so both are
/// kept raw and parsed leniently.
#[derive(Debug, Deserialize)]
pub struct RawSample {
    #[serde(default)]
    pub timestamp: Option<Value>,
    #[serde(default)]
    pub availability_perc: Option<Value>,
}

impl RawSample {
    /// Parse into a sample, returning `None` when either field is missing
    /// or non-numeric.
    pub fn parse(&self) -> Option<AvailabilitySample> {
        let timestamp = value_as_i64(self.timestamp.as_ref()?)?;
        let percentage = value_as_f64(self.availability_perc.as_ref()?)?;
        Some(AvailabilitySample {
            timestamp,
            percentage,
        })
    }
}

fn value_as_i64(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_as_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sysname_prefix_stripped() {
        let device: ApiDevice = serde_json::from_str(
            r#"{"device_id": 7, "hostname": "sw-core", "sysname": "sysName: core-01 "}"#,
        )
        .unwrap();
        assert_eq!(device.clean_sysname(), "core-01");
    }

    #[test]
    fn test_sysname_falls_back_to_hostname() {
        let device: ApiDevice = serde_json::from_str(
            r#"{"device_id": 7, "hostname": "sw-core", "sysname": "  "}"#,
        )
        .unwrap();
        assert_eq!(device.clean_sysname(), "sw-core");

        let device: ApiDevice =
            serde_json::from_str(r#"{"device_id": 7, "hostname": "sw-core"}"#).unwrap();
        assert_eq!(device.clean_sysname(), "sw-core");
    }

    #[test]
    fn test_sysname_camel_case_alias() {
        let device: ApiDevice = serde_json::from_str(
            r#"{"device_id": 7, "hostname": "sw-core", "sysName": "core-01"}"#,
        )
        .unwrap();
        assert_eq!(device.clean_sysname(), "core-01");
    }

    #[test]
    fn test_raw_sample_accepts_strings_and_numbers() {
        let sample: RawSample =
            serde_json::from_str(r#"{"timestamp": "1700000000", "availability_perc": "99.5"}"#)
                .unwrap();
        let parsed = sample.parse().unwrap();
        assert_eq!(parsed.timestamp, 1_700_000_000);
        assert_eq!(parsed.percentage, 99.5);

        let sample: RawSample =
            serde_json::from_str(r#"{"timestamp": 1700000000, "availability_perc": 99.5}"#)
                .unwrap();
        assert!(sample.parse().is_some());
    }

    #[test]
    fn test_raw_sample_rejects_garbage() {
        let sample: RawSample =
            serde_json::from_str(r#"{"timestamp": "soon", "availability_perc": "99.5"}"#).unwrap();
        assert!(sample.parse().is_none());

        let sample: RawSample = serde_json::from_str(r#"{"availability_perc": 10}"#).unwrap();
        assert!(sample.parse().is_none());
    }
}
