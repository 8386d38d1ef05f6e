mod error;
mod fetch;
mod nmc_weather;
mod types;

pub use error::NmcWeatherError;
pub use nmc_weather::*;

pub use fetch::error::FetchError;
pub use fetch::fetcher::{ReportFetcher, DEFAULT_BASE_URL};

pub use types::condition::WeatherCondition;
pub use types::forecast::DailyForecast;
pub use types::report::*;
