use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{debug, info};

use super::IndicatorResponse;
use crate::config::DEFAULT_USER_AGENT;
use crate::error::CollectError;

const INDICATOR_DATA_PATH: &str = "DataBank/indicator_data";

/// Anything that can answer "indicator X for country Y"
#[allow(async_fn_in_trait)]
pub trait IndicatorSource {
    async fn fetch(
        &self,
        indicator_code: &str,
        country_code: &str,
    ) -> Result<IndicatorResponse, CollectError>;
}

/// HTTP client for the DataBank `indicator_data` endpoint
#[derive(Debug, Clone)]
pub struct DataBankClient {
    client: Client,
    base_url: String,
}

impl DataBankClient {
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, indicator_code: &str, country_code: &str) -> Result<Url, CollectError> {
        let raw = format!("{}/{}", self.base_url, INDICATOR_DATA_PATH);
        Url::parse_with_params(
            &raw,
            &[("indicator", indicator_code), ("country", country_code)],
        )
        .map_err(|e| CollectError::InvalidResponse {
            country: country_code.to_string(),
            indicator: indicator_code.to_string(),
            message: format!("bad endpoint URL '{}': {}", raw, e),
        })
    }
}

impl IndicatorSource for DataBankClient {
    async fn fetch(
        &self,
        indicator_code: &str,
        country_code: &str,
    ) -> Result<IndicatorResponse, CollectError> {
        let url = self.endpoint(indicator_code, country_code)?;
        info!("Fetching {} for {}", indicator_code, country_code);
        debug!("GET {}", url);

        let request_error = |source| CollectError::Request {
            country: country_code.to_string(),
            indicator: indicator_code.to_string(),
            source,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CollectError::Status {
                country: country_code.to_string(),
                indicator: indicator_code.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(request_error)?;

        serde_json::from_str(&body).map_err(|e| CollectError::InvalidResponse {
            country: country_code.to_string(),
            indicator: indicator_code.to_string(),
            message: e.to_string(),
        })
    }
}
