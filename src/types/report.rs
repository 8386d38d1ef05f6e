//! Serde wire model for the NMC station weather payload.
//!
//! Only the consumed subset of the endpoint's `data` object is modelled;
//! unknown fields are ignored. The derived read accessors live here too so
//! they can be computed fresh from whatever payload the last fetch stored.

use crate::error::NmcWeatherError;
use crate::types::condition::WeatherCondition;
use crate::types::forecast::DailyForecast;
use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer};

/// Top-level response body; everything of interest sits under `data`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportEnvelope {
    pub data: WeatherReport,
}

/// The `data` payload of one station weather response.
///
/// Replaced wholesale on every successful fetch; no history is kept.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherReport {
    pub real: RealReport,
    pub predict: Predict,
    pub tempchart: Vec<TempChartPoint>,
    pub air: AirQuality,
}

/// Current observation block (`data.real`).
#[derive(Debug, Clone, Deserialize)]
pub struct RealReport {
    pub weather: RealWeather,
    pub wind: RealWind,
    pub warn: RealWarning,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RealWeather {
    pub info: String,
    #[serde(deserialize_with = "flexible_f64")]
    pub temperature: f64,
    #[serde(deserialize_with = "flexible_f64")]
    pub humidity: f64,
    #[serde(deserialize_with = "flexible_f64")]
    pub airpressure: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RealWind {
    pub direct: String,
    pub power: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RealWarning {
    pub alert: String,
}

/// Multi-day forecast block (`data.predict`).
#[derive(Debug, Clone, Deserialize)]
pub struct Predict {
    pub detail: Vec<PredictDay>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictDay {
    pub date: String,
    pub day: DayPeriod,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DayPeriod {
    pub weather: PeriodWeather,
    pub wind: PeriodWind,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PeriodWeather {
    pub info: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PeriodWind {
    pub direct: String,
    pub power: String,
}

/// One point of the temperature chart (`data.tempchart[]`).
#[derive(Debug, Clone, Deserialize)]
pub struct TempChartPoint {
    #[serde(deserialize_with = "flexible_f64")]
    pub max_temp: f64,
    #[serde(deserialize_with = "flexible_f64")]
    pub min_temp: f64,
}

/// Air quality block (`data.air`).
#[derive(Debug, Clone, Deserialize)]
pub struct AirQuality {
    #[serde(deserialize_with = "flexible_f64")]
    pub aqi: f64,
}

/// The endpoint serves some numeric fields as JSON numbers and others as
/// quoted strings, depending on station and section.
fn flexible_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(value) => Ok(value),
        NumberOrText::Text(text) => text.trim().parse().map_err(de::Error::custom),
    }
}

impl WeatherReport {
    /// Canonical condition for the current observation.
    ///
    /// Fails with [`NmcWeatherError::UnknownCondition`] when the report
    /// string is outside the translation table.
    pub fn condition(&self) -> Result<WeatherCondition, NmcWeatherError> {
        let info = &self.real.weather.info;
        WeatherCondition::from_report(info)
            .ok_or_else(|| NmcWeatherError::UnknownCondition(info.clone()))
    }

    /// Current temperature in degrees Celsius.
    pub fn temperature(&self) -> f64 {
        self.real.weather.temperature
    }

    /// Current relative humidity.
    pub fn humidity(&self) -> f64 {
        self.real.weather.humidity
    }

    /// Wind power class, e.g. `3级`.
    pub fn wind_speed(&self) -> &str {
        &self.real.wind.power
    }

    /// Wind direction, e.g. `东北风`.
    pub fn wind_bearing(&self) -> &str {
        &self.real.wind.direct
    }

    /// Barometric pressure in hPa, rounded to two decimals.
    pub fn pressure(&self) -> f64 {
        (self.real.weather.airpressure / 100.0 * 100.0).round() / 100.0
    }

    /// Air quality index.
    pub fn aqi(&self) -> f64 {
        self.air.aqi
    }

    /// Active alert text; the provider sends `9999` when no alert is active.
    pub fn alert(&self) -> &str {
        &self.real.warn.alert
    }

    /// Builds the six-day forecast from days 1..=6 of the predict detail
    /// list. The temperature chart also carries past days; the chart entry
    /// for forecast day `i` sits at index `i + 7`.
    pub fn forecast(&self) -> Result<Vec<DailyForecast>, NmcWeatherError> {
        let mut days = Vec::with_capacity(6);
        for i in 1..=6 {
            let detail = self
                .predict
                .detail
                .get(i)
                .ok_or(NmcWeatherError::MissingForecastDay { index: i })?;
            let chart = self
                .tempchart
                .get(i + 7)
                .ok_or(NmcWeatherError::MissingTempChartEntry { index: i + 7 })?;
            let date = NaiveDate::parse_from_str(&detail.date, "%Y-%m-%d").map_err(|e| {
                NmcWeatherError::InvalidForecastDate {
                    value: detail.date.clone(),
                    source: e,
                }
            })?;
            let info = &detail.day.weather.info;
            let condition = WeatherCondition::from_report(info)
                .ok_or_else(|| NmcWeatherError::UnknownCondition(info.clone()))?;
            days.push(DailyForecast {
                date,
                condition,
                temp_max: chart.max_temp,
                temp_min: chart.min_temp,
                wind_bearing: detail.day.wind.direct.clone(),
                wind_speed: detail.day.wind.power.clone(),
            });
        }
        Ok(days)
    }
}
