//! This module provides the main entry point of the crate: the [`NmcWeather`]
//! entity, which polls one NMC station and exposes the decoded report through
//! the weather-entity property surface (condition, temperature, humidity,
//! wind, pressure, air quality, alerts and a six-day forecast).

use crate::error::NmcWeatherError;
use crate::fetch::fetcher::ReportFetcher;
use crate::types::condition::WeatherCondition;
use crate::types::forecast::DailyForecast;
use crate::types::report::WeatherReport;
use bon::bon;
use log::warn;
use serde_json::{Map, Value};
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Fixed provider attribution string.
pub const ATTRIBUTION: &str = "Powered by WWW.NMC.COM";

const DEFAULT_NAME: &str = "weathernmc";
const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(60);
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(10);

/// A weather entity bound to one NMC station.
///
/// Construction performs an immediate fetch, so a connected entity always
/// holds a payload. The host is expected to call [`NmcWeather::update`]
/// periodically; updates arriving before `update_interval` has elapsed are
/// throttled to a logged no-op, everything else replaces the payload
/// wholesale.
///
/// # Examples
///
/// ```no_run
/// # use weathernmc::{NmcWeather, NmcWeatherError};
/// # async fn run() -> Result<(), NmcWeatherError> {
/// let mut beijing = NmcWeather::connect().station("54511").call().await?;
///
/// beijing.update().await?;
/// println!(
///     "{}: {} {}{}",
///     beijing.name(),
///     beijing.condition()?,
///     beijing.temperature(),
///     beijing.temperature_unit(),
/// );
/// for day in beijing.forecast()? {
///     println!("{}: {} {}..{}", day.date, day.condition, day.temp_min, day.temp_max);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct NmcWeather {
    station: String,
    name: String,
    update_interval: Duration,
    retry_delay: Duration,
    max_retries: Option<u32>,
    cancel: CancellationToken,
    fetcher: ReportFetcher,
    report: WeatherReport,
    last_update: Instant,
}

#[bon]
impl NmcWeather {
    /// Creates the entity and performs the initial fetch.
    ///
    /// The initial fetch is never throttled and runs through the same retry
    /// loop as [`NmcWeather::update`], so construction only returns once a
    /// payload has been decoded (or the loop was cancelled / exhausted).
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.station(&str)`: **Required.** The NMC station code (e.g. `"54511"` for Beijing).
    /// * `.name(String)`: Optional. Display name of the entity. Defaults to `"weathernmc"`.
    /// * `.update_interval(Duration)`: Optional. Minimum time between fetches. Defaults to 60 seconds.
    /// * `.retry_delay(Duration)`: Optional. Fixed pause between failed fetch attempts. Defaults to 10 seconds, no backoff growth.
    /// * `.max_retries(u32)`: Optional. Bounds the retries per update; unbounded when absent.
    /// * `.cancel(CancellationToken)`: Optional. Interrupts the retry loop, e.g. on host shutdown.
    /// * `.base_url(String)`: Optional. Overrides `http://www.nmc.cn`, for tests and proxies.
    ///
    /// # Errors
    ///
    /// Returns [`NmcWeatherError::Fetch`] if the HTTP client cannot be built,
    /// [`NmcWeatherError::Cancelled`] if the token fires while the initial
    /// fetch is still failing, and [`NmcWeatherError::RetriesExhausted`] when
    /// a bounded retry budget runs out.
    #[builder]
    pub async fn connect(
        station: &str,
        name: Option<String>,
        update_interval: Option<Duration>,
        retry_delay: Option<Duration>,
        max_retries: Option<u32>,
        cancel: Option<CancellationToken>,
        base_url: Option<String>,
    ) -> Result<Self, NmcWeatherError> {
        // Defaults below are applied *if* the corresponding builder method was not called.
        let name = name.unwrap_or_else(|| DEFAULT_NAME.to_string());
        let update_interval = update_interval.unwrap_or(DEFAULT_UPDATE_INTERVAL);
        let retry_delay = retry_delay.unwrap_or(DEFAULT_RETRY_DELAY);
        let cancel = cancel.unwrap_or_default();

        let fetcher = match &base_url {
            Some(url) => ReportFetcher::with_base_url(url, station)?,
            None => ReportFetcher::new(station)?,
        };

        let report = fetch_with_retry(&fetcher, retry_delay, max_retries, &cancel).await?;
        Ok(Self {
            station: station.to_string(),
            name,
            update_interval,
            retry_delay,
            max_retries,
            cancel,
            fetcher,
            report,
            last_update: Instant::now(),
        })
    }
}

impl NmcWeather {
    /// Refreshes the payload if the update interval has elapsed.
    ///
    /// Calls arriving early are throttled: a warning is logged and the
    /// previous payload stays in place, which is a success from the host's
    /// point of view. Past the interval, the fetch retries on failure with a
    /// fixed delay until it succeeds, the cancellation token fires, or a
    /// configured retry bound is exhausted. The timestamp only advances on a
    /// successful fetch.
    pub async fn update(&mut self) -> Result<(), NmcWeatherError> {
        let elapsed = self.last_update.elapsed();
        if elapsed < self.update_interval {
            warn!(
                "Update for station {} skipped, only {:.0?} of the {:.0?} interval elapsed",
                self.station, elapsed, self.update_interval
            );
            return Ok(());
        }

        let report =
            fetch_with_retry(&self.fetcher, self.retry_delay, self.max_retries, &self.cancel)
                .await?;
        self.report = report;
        self.last_update = Instant::now();
        Ok(())
    }

    /// Display name of the entity.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Station code this entity polls.
    pub fn station(&self) -> &str {
        &self.station
    }

    /// Minimum time between fetches.
    pub fn update_interval(&self) -> Duration {
        self.update_interval
    }

    /// Token that interrupts a running retry loop; hand a clone to the host
    /// so shutdown can cancel a stuck update.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Canonical condition for the current observation.
    pub fn condition(&self) -> Result<WeatherCondition, NmcWeatherError> {
        self.report.condition()
    }

    /// Current temperature in degrees Celsius.
    pub fn temperature(&self) -> f64 {
        self.report.temperature()
    }

    /// Unit of [`NmcWeather::temperature`].
    pub fn temperature_unit(&self) -> &'static str {
        "°C"
    }

    /// Current relative humidity.
    pub fn humidity(&self) -> f64 {
        self.report.humidity()
    }

    /// Wind power class of the current observation, e.g. `3级`.
    pub fn wind_speed(&self) -> &str {
        self.report.wind_speed()
    }

    /// Wind direction of the current observation, e.g. `东北风`.
    pub fn wind_bearing(&self) -> &str {
        self.report.wind_bearing()
    }

    /// Barometric pressure in hPa, rounded to two decimals.
    pub fn pressure(&self) -> f64 {
        self.report.pressure()
    }

    /// Air quality index.
    pub fn aqi(&self) -> f64 {
        self.report.aqi()
    }

    /// Active alert text; `9999` when no alert is active.
    pub fn alert(&self) -> &str {
        self.report.alert()
    }

    /// Fixed data-provider attribution.
    pub fn attribution(&self) -> &'static str {
        ATTRIBUTION
    }

    /// Six-day forecast, ordered by increasing day offset.
    pub fn forecast(&self) -> Result<Vec<DailyForecast>, NmcWeatherError> {
        self.report.forecast()
    }

    /// Extension attributes merged into the host's generic state attributes.
    pub fn extra_state_attributes(&self) -> Map<String, Value> {
        let mut attributes = Map::new();
        attributes.insert("aqi".to_string(), self.aqi().into());
        attributes
    }

    /// The raw payload of the last successful fetch.
    pub fn report(&self) -> &WeatherReport {
        &self.report
    }
}

/// Runs single fetch attempts until one succeeds, pausing `retry_delay`
/// between failures. The sleep races the cancellation token; `max_retries`
/// bounds the number of retries after the first failed attempt.
async fn fetch_with_retry(
    fetcher: &ReportFetcher,
    retry_delay: Duration,
    max_retries: Option<u32>,
    cancel: &CancellationToken,
) -> Result<WeatherReport, NmcWeatherError> {
    let mut failed_attempts: u32 = 0;
    loop {
        match fetcher.fetch().await {
            Ok(report) => return Ok(report),
            Err(err) => {
                failed_attempts += 1;
                warn!(
                    "Fetch for station {} failed (attempt {}): {}",
                    fetcher.station(),
                    failed_attempts,
                    err
                );
                if let Some(max) = max_retries {
                    if failed_attempts > max {
                        return Err(NmcWeatherError::RetriesExhausted {
                            station: fetcher.station().to_string(),
                            attempts: failed_attempts,
                            source: err,
                        });
                    }
                }
                tokio::select! {
                    _ = cancel.cancelled() => {
                        return Err(NmcWeatherError::Cancelled {
                            station: fetcher.station().to_string(),
                        });
                    }
                    _ = tokio::time::sleep(retry_delay) => {}
                }
            }
        }
    }
}
