use crate::fetch::error::FetchError;
use crate::types::report::{ReportEnvelope, WeatherReport};
use log::{debug, warn};
use reqwest::Client;
use std::time::Duration;

/// Base URL of the public NMC REST API.
pub const DEFAULT_BASE_URL: &str = "http://www.nmc.cn";

const FETCH_TIMEOUT: Duration = Duration::from_secs(3);

/// Issues the station weather request and decodes the `data` payload.
///
/// One fetcher is bound to one station code. The HTTP client carries the
/// fixed 3 second request timeout, so a single fetch attempt never blocks
/// longer than that.
#[derive(Debug)]
pub struct ReportFetcher {
    client: Client,
    station: String,
    base_url: String,
}

impl ReportFetcher {
    pub fn new(station: &str) -> Result<Self, FetchError> {
        Self::with_base_url(DEFAULT_BASE_URL, station)
    }

    /// Points the fetcher at a different host, e.g. a mock server or proxy.
    pub fn with_base_url(base_url: &str, station: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(FetchError::ClientBuild)?;
        Ok(Self {
            client,
            station: station.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn station(&self) -> &str {
        &self.station
    }

    /// Performs a single `GET /rest/weather?stationid={code}` round trip.
    ///
    /// Any network error, timeout, non-success status, malformed JSON body
    /// or missing consumed field comes back as a [`FetchError`]; the caller
    /// owns the retry policy.
    pub async fn fetch(&self) -> Result<WeatherReport, FetchError> {
        let url = format!("{}/rest/weather?stationid={}", self.base_url, self.station);
        debug!("Requesting weather report from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    FetchError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    FetchError::NetworkRequest(url, e)
                });
            }
        };

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::BodyRead(url.clone(), e))?;
        let envelope: ReportEnvelope =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode(url, e))?;

        debug!(
            "Received weather report for station {} ({} bytes)",
            self.station,
            body.len()
        );
        Ok(envelope.data)
    }
}
