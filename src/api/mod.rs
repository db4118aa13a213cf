//! HTTP client for the monitoring API.
//!
//! One blocking-style call at a time: devices are processed sequentially
//! and each fetch is awaited before the next starts.

pub mod models;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::Config;
use crate::stats::{AvailabilitySample, Device, OutageWindow};
use models::{AvailabilityResponse, DevicesResponse, OutagesResponse};

/// API error types.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API returned status {status:?} for {what}")]
    Status { what: String, status: String },
}

/// Client for a LibreNMS-style monitoring API with static-token auth.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    pub fn new(cfg: &Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: cfg.base_url.clone(),
            token: cfg.token.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .header("X-Auth-Token", &self.token)
            .query(query)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<T>().await?)
    }

    /// Fetch the list of monitored devices.
    pub async fn get_devices(&self) -> Result<Vec<Device>, ApiError> {
        let resp: DevicesResponse = self.get_json("/devices", &[]).await?;
        if resp.status != "ok" {
            return Err(ApiError::Status {
                what: "devices".to_string(),
                status: resp.status,
            });
        }
        Ok(resp.devices.into_iter().map(|d| d.into_device()).collect())
    }

    /// Fetch the recorded outage windows for one device, unsorted.
    pub async fn get_outages(&self, device_id: i64) -> Result<Vec<OutageWindow>, ApiError> {
        let path = format!("/devices/{}/outages", device_id);
        let resp: OutagesResponse = self.get_json(&path, &[]).await?;
        if resp.status != "ok" {
            return Err(ApiError::Status {
                what: format!("outages of device {}", device_id),
                status: resp.status,
            });
        }
        Ok(resp.outages.into_iter().map(Into::into).collect())
    }

    /// Fetch pre-aggregated availability samples for one device over a
    /// date range. Entries with missing or non-numeric fields are skipped
    /// with a warning.
    pub async fn get_availability(
        &self,
        device_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AvailabilitySample>, ApiError> {
        let path = format!("/devices/{}/availability", device_id);
        let query = [
            ("from", from.format("%Y-%m-%d").to_string()),
            ("to", to.format("%Y-%m-%d").to_string()),
        ];
        let resp: AvailabilityResponse = self.get_json(&path, &query).await?;

        let mut samples = Vec::with_capacity(resp.availability.len());
        for raw in &resp.availability {
            match raw.parse() {
                Some(sample) => samples.push(sample),
                None => {
                    tracing::warn!(
                        "skipping malformed availability entry for device {}: {:?}",
                        device_id,
                        raw
                    );
                }
            }
        }
        Ok(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        let mut cfg = Config {
            base_url: server.uri(),
            token: "test-token".to_string(),
            ..Config::default()
        };
        cfg.validate().unwrap();
        ApiClient::new(&cfg).unwrap()
    }

    #[tokio::test]
    async fn test_get_devices_ok() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/devices"))
            .and(header("X-Auth-Token", "test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ok",
                "devices": [
                    {
                        "device_id": 1,
                        "hostname": "sw-core",
                        "ip": "10.0.0.1",
                        "sysName": "sysName: core-01",
                        "inserted": "2023-01-15 10:00:00"
                    }
                ]
            })))
            .mount(&server)
            .await;

        let devices = client_for(&server).get_devices().await.unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].id, 1);
        assert_eq!(devices[0].sysname, "core-01");
        assert_eq!(devices[0].enrollment_date, "2023-01-15 10:00:00");
    }

    #[tokio::test]
    async fn test_get_devices_bad_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/devices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "error",
                "devices": []
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).get_devices().await.unwrap_err();
        assert!(matches!(err, ApiError::Status { .. }));
    }

    #[tokio::test]
    async fn test_get_outages_bad_status_is_typed_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/devices/9/outages"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "status": "error" })),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).get_outages(9).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { .. }));
    }

    #[tokio::test]
    async fn test_get_outages_maps_windows() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/devices/9/outages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ok",
                "outages": [
                    { "going_down": 100, "up_again": 200 },
                    { "going_down": 300, "up_again": null }
                ]
            })))
            .mount(&server)
            .await;

        let windows = client_for(&server).get_outages(9).await.unwrap();
        assert_eq!(
            windows,
            vec![
                OutageWindow { down_at: 100, up_at: Some(200) },
                OutageWindow { down_at: 300, up_at: None },
            ]
        );
    }

    #[tokio::test]
    async fn test_get_availability_skips_malformed_entries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/devices/3/availability"))
            .and(query_param("from", "2024-03-01"))
            .and(query_param("to", "2024-03-02"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "availability": [
                    { "timestamp": 1709300000i64, "availability_perc": "99.5" },
                    { "timestamp": "never", "availability_perc": 50 },
                    { "availability_perc": 50 }
                ]
            })))
            .mount(&server)
            .await;

        let from = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let samples = client_for(&server)
            .get_availability(3, from, to)
            .await
            .unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].percentage, 99.5);
    }
}
