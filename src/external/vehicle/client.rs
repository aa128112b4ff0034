use std::time::Duration;

use async_trait::async_trait;

use crate::config::EnrichmentConfig;
use crate::error::{AppError, AppResult};
use crate::external::client::build_http_client;
use crate::external::vehicle::provider::VehicleInfoProvider;
use crate::external::vehicle::types::VehicleInfo;

const SERVICE: &str = "vehicle-info";

/// HTTP client for the vehicle-info API.
///
/// Issues `GET {base_url}/info?regNum=<reg_num>` and decodes the JSON body.
pub struct VehicleInfoClient {
    base_url: String,
    client: reqwest::Client,
}

impl VehicleInfoClient {
    /// Creates a client from configuration, building the underlying HTTP
    /// client with the configured timeouts.
    pub fn new(config: &EnrichmentConfig) -> AppResult<Self> {
        let client = build_http_client(
            Duration::from_secs(config.connect_timeout),
            Duration::from_secs(config.request_timeout),
        )?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl VehicleInfoProvider for VehicleInfoClient {
    async fn fetch(&self, reg_num: &str) -> AppResult<VehicleInfo> {
        let url = format!("{}/info", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("regNum", reg_num)])
            .send()
            .await
            .map_err(|e| AppError::UpstreamUnavailable {
                service: SERVICE.to_string(),
                source: anyhow::Error::from(e),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UpstreamStatus {
                service: SERVICE.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .json::<VehicleInfo>()
            .await
            .map_err(|e| AppError::UpstreamDecode {
                service: SERVICE.to_string(),
                source: anyhow::Error::from(e),
            })
    }
}
