//! Defines the `WeatherCondition` enum, mapping the condition strings reported
//! by the NMC API to the small canonical vocabulary consumed by weather UIs.

use std::fmt;

/// Canonical weather state derived from the provider's condition string.
///
/// The NMC API reports current and forecast conditions as human-readable
/// Chinese strings (e.g. `多云`, `雷阵雨`). This enum is the fixed, process-wide
/// translation target; use [`WeatherCondition::from_report`] to map a report
/// string into it.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum WeatherCondition {
    /// Clear sky (`晴`).
    Sunny,
    /// Cloudy or overcast (`多云`, `阴`).
    Cloudy,
    /// Partly cloudy (`局部多云`).
    PartlyCloudy,
    /// Fog, mist, haze and dust conditions (`雾`, `薄雾`, `扬沙`, `沙尘`, ...).
    Fog,
    /// Light to moderate rain (`小雨`, `中雨`, `雨`).
    Rainy,
    /// Heavy rain or rainstorm (`大雨`, `暴雨`).
    Pouring,
    /// Any snowfall intensity (`小雪` through `暴雪`, `雪`).
    Snowy,
    /// Mixed rain and snow (`雨夹雪`).
    SnowyRainy,
    /// Thundershower (`雷阵雨`).
    LightningRainy,
    /// Hail (`冰雹`).
    Hail,
    /// High wind (`大风`).
    Windy,
    /// The provider's `9999` placeholder for out-of-vocabulary conditions.
    Exceptional,
}

impl WeatherCondition {
    /// Attempts to translate a condition string from an NMC report.
    ///
    /// Returns `None` for strings outside the known vocabulary; callers
    /// decide whether that is an error. The table is intentionally exact,
    /// there is no fuzzy or prefix matching.
    pub fn from_report(info: &str) -> Option<Self> {
        match info {
            "晴" => Some(WeatherCondition::Sunny),
            "多云" | "阴" => Some(WeatherCondition::Cloudy),
            "局部多云" => Some(WeatherCondition::PartlyCloudy),
            "雾" | "中雾" | "大雾" | "薄雾" | "扬沙" | "沙尘" => Some(WeatherCondition::Fog),
            "小雨" | "中雨" | "雨" => Some(WeatherCondition::Rainy),
            "大雨" | "暴雨" => Some(WeatherCondition::Pouring),
            "小雪" | "中雪" | "大雪" | "暴雪" | "雪" => Some(WeatherCondition::Snowy),
            "雨夹雪" => Some(WeatherCondition::SnowyRainy),
            "雷阵雨" => Some(WeatherCondition::LightningRainy),
            "冰雹" => Some(WeatherCondition::Hail),
            "大风" => Some(WeatherCondition::Windy),
            "9999" => Some(WeatherCondition::Exceptional),
            _ => None,
        }
    }

    /// The canonical tag used by host platforms for this condition.
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::Sunny => "sunny",
            WeatherCondition::Cloudy => "cloudy",
            WeatherCondition::PartlyCloudy => "partlycloudy",
            WeatherCondition::Fog => "fog",
            WeatherCondition::Rainy => "rainy",
            WeatherCondition::Pouring => "pouring",
            WeatherCondition::Snowy => "snowy",
            WeatherCondition::SnowyRainy => "snowy-rainy",
            WeatherCondition::LightningRainy => "lightning-rainy",
            WeatherCondition::Hail => "hail",
            WeatherCondition::Windy => "windy",
            WeatherCondition::Exceptional => "exceptional",
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::WeatherCondition;

    #[test]
    fn known_strings_map_to_exactly_one_tag() {
        let cases = [
            ("晴", WeatherCondition::Sunny),
            ("多云", WeatherCondition::Cloudy),
            ("局部多云", WeatherCondition::PartlyCloudy),
            ("阴", WeatherCondition::Cloudy),
            ("雾", WeatherCondition::Fog),
            ("中雾", WeatherCondition::Fog),
            ("大雾", WeatherCondition::Fog),
            ("小雨", WeatherCondition::Rainy),
            ("中雨", WeatherCondition::Rainy),
            ("大雨", WeatherCondition::Pouring),
            ("暴雨", WeatherCondition::Pouring),
            ("小雪", WeatherCondition::Snowy),
            ("中雪", WeatherCondition::Snowy),
            ("大雪", WeatherCondition::Snowy),
            ("暴雪", WeatherCondition::Snowy),
            ("扬沙", WeatherCondition::Fog),
            ("沙尘", WeatherCondition::Fog),
            ("雷阵雨", WeatherCondition::LightningRainy),
            ("冰雹", WeatherCondition::Hail),
            ("雨夹雪", WeatherCondition::SnowyRainy),
            ("大风", WeatherCondition::Windy),
            ("薄雾", WeatherCondition::Fog),
            ("雨", WeatherCondition::Rainy),
            ("雪", WeatherCondition::Snowy),
            ("9999", WeatherCondition::Exceptional),
        ];
        for (info, expected) in cases {
            assert_eq!(
                WeatherCondition::from_report(info),
                Some(expected),
                "mapping for '{}'",
                info
            );
        }
    }

    #[test]
    fn unrecognized_strings_fail_the_lookup() {
        assert_eq!(WeatherCondition::from_report("台风"), None);
        assert_eq!(WeatherCondition::from_report(""), None);
        assert_eq!(WeatherCondition::from_report("sunny"), None);
    }

    #[test]
    fn canonical_tags_match_host_vocabulary() {
        assert_eq!(WeatherCondition::Sunny.as_str(), "sunny");
        assert_eq!(WeatherCondition::PartlyCloudy.as_str(), "partlycloudy");
        assert_eq!(WeatherCondition::SnowyRainy.as_str(), "snowy-rainy");
        assert_eq!(WeatherCondition::LightningRainy.as_str(), "lightning-rainy");
        assert_eq!(WeatherCondition::Exceptional.to_string(), "exceptional");
    }
}
