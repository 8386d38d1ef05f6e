use crate::fetch::error::FetchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NmcWeatherError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Giving up on station '{station}' after {attempts} failed fetch attempts")]
    RetriesExhausted {
        station: String,
        attempts: u32,
        #[source]
        source: FetchError,
    },

    #[error("Weather update for station '{station}' was cancelled")]
    Cancelled { station: String },

    #[error("Unrecognized weather condition '{0}'")]
    UnknownCondition(String),

    #[error("Forecast day {index} is missing from the predict detail list")]
    MissingForecastDay { index: usize },

    #[error("Temperature chart entry {index} is missing")]
    MissingTempChartEntry { index: usize },

    #[error("Invalid forecast date '{value}'")]
    InvalidForecastDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
