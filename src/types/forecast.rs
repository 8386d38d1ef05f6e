use crate::types::condition::WeatherCondition;
use chrono::NaiveDate;

/// One day of the six-day forecast window.
///
/// Temperatures come from the report's temperature chart, condition and wind
/// from the daytime half of the predict detail entry.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub condition: WeatherCondition,
    pub temp_max: f64,
    pub temp_min: f64,
    pub wind_bearing: String,
    pub wind_speed: String,
}
