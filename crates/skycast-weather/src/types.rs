use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Measurement unit preference, mapped straight onto the OpenWeather
/// `units` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_query(&self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }

    pub fn temp_symbol(&self) -> &'static str {
        match self {
            Self::Metric => "°C",
            Self::Imperial => "°F",
        }
    }

    pub fn wind_unit(&self) -> &'static str {
        match self {
            Self::Metric => "m/s",
            Self::Imperial => "mph",
        }
    }
}

impl std::str::FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "metric" => Ok(Self::Metric),
            "imperial" => Ok(Self::Imperial),
            other => Err(format!("unknown units '{}', expected metric or imperial", other)),
        }
    }
}

/// Description language. Two fixed locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Es,
    En,
}

impl Lang {
    pub fn as_query(&self) -> &'static str {
        match self {
            Self::Es => "es",
            Self::En => "en",
        }
    }
}

impl std::str::FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "es" => Ok(Self::Es),
            "en" => Ok(Self::En),
            other => Err(format!("unknown language '{}', expected es or en", other)),
        }
    }
}

/// Current conditions for one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Display name, `"Name, CC"` when the country code is known.
    pub city: String,
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub pressure: u32,
    pub wind_speed: f64,
    pub desc: String,
    pub icon: Option<String>,
    pub units: Units,
    /// Seconds east of UTC at the destination, when reported.
    pub tz_offset: Option<i32>,
    /// Measurement timestamp (UTC epoch seconds), when reported.
    pub observed_at: Option<i64>,
}

/// One summarized forecast day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    /// Short localized label such as "Lun 06".
    pub label: String,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Most frequent description across the day's blocks.
    pub desc: String,
    pub icon: Option<String>,
    /// Mean precipitation probability for the day, 0..1.
    pub pop: f64,
}

/// Weather retrieval errors.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Missing OpenWeather API key")]
    MissingApiKey,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_units_query_and_symbols() {
        assert_eq!(Units::Metric.as_query(), "metric");
        assert_eq!(Units::Imperial.as_query(), "imperial");
        assert_eq!(Units::Metric.temp_symbol(), "°C");
        assert_eq!(Units::Imperial.temp_symbol(), "°F");
        assert_eq!(Units::Metric.wind_unit(), "m/s");
        assert_eq!(Units::Imperial.wind_unit(), "mph");
    }

    #[test]
    fn test_units_from_str() {
        assert_eq!("metric".parse::<Units>().unwrap(), Units::Metric);
        assert_eq!("IMPERIAL".parse::<Units>().unwrap(), Units::Imperial);
        assert!("kelvin".parse::<Units>().is_err());
    }

    #[test]
    fn test_lang_from_str() {
        assert_eq!("es".parse::<Lang>().unwrap(), Lang::Es);
        assert_eq!("EN".parse::<Lang>().unwrap(), Lang::En);
        assert!("fr".parse::<Lang>().is_err());
    }
}
