//! OpenWeather HTTP client for current conditions and the 5-day forecast.
//!
//! Requests carry `q`, `appid`, `units` and `lang` and run under a fixed
//! 10-second timeout. Successful responses land in the TTL cache; the
//! forecast is cached in summarized form.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::cache::{CacheKey, ResponseCache, CACHE_TTL};
use crate::forecast::{summarize, ForecastBlock};
use crate::types::{CurrentConditions, DailySummary, Lang, Units, WeatherError};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    name: Option<String>,
    #[serde(default)]
    sys: SysSection,
    main: MainSection,
    #[serde(default)]
    weather: Vec<WeatherSection>,
    #[serde(default)]
    wind: WindSection,
    timezone: Option<i32>,
    dt: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct SysSection {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MainSection {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct WeatherSection {
    description: Option<String>,
    icon: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WindSection {
    speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    list: Vec<ForecastBlock>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
    units: Units,
    lang: Lang,
    cache: Arc<ResponseCache>,
}

impl WeatherClient {
    pub fn new(
        api_key: impl Into<String>,
        units: Units,
        lang: Lang,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            units,
            lang,
            cache: Arc::new(ResponseCache::new(CACHE_TTL)),
        })
    }

    /// Point the client at a different endpoint root (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn units(&self) -> Units {
        self.units
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    /// Current conditions for a city. The bool reports a cache hit.
    pub async fn current(&self, city: &str) -> Result<(CurrentConditions, bool), WeatherError> {
        if self.api_key.is_empty() {
            return Err(WeatherError::MissingApiKey);
        }

        let key = CacheKey::new(city, self.units, self.lang);
        if let Some(hit) = self.cache.get_current(&key) {
            tracing::debug!("Current conditions for {} served from cache", city);
            return Ok((hit, true));
        }

        let url = format!("{}/weather", self.base_url);
        let raw: CurrentResponse = self.get_json(&url, city).await?;

        let city_label = match (raw.name, raw.sys.country) {
            (Some(name), Some(country)) if !country.is_empty() => {
                format!("{}, {}", name, country)
            }
            (Some(name), _) => name,
            _ => city.to_string(),
        };

        let conditions = CurrentConditions {
            city: city_label,
            temp: raw.main.temp,
            feels_like: raw.main.feels_like,
            humidity: raw.main.humidity,
            pressure: raw.main.pressure,
            wind_speed: raw.wind.speed.unwrap_or(0.0),
            desc: raw
                .weather
                .first()
                .and_then(|w| w.description.clone())
                .unwrap_or_default(),
            icon: raw.weather.first().and_then(|w| w.icon.clone()),
            units: self.units,
            tz_offset: raw.timezone,
            observed_at: raw.dt,
        };

        self.cache.put_current(key, conditions.clone());
        Ok((conditions, false))
    }

    /// Summarized 5-day forecast for a city. The bool reports a cache hit.
    pub async fn forecast(&self, city: &str) -> Result<(Vec<DailySummary>, bool), WeatherError> {
        if self.api_key.is_empty() {
            return Err(WeatherError::MissingApiKey);
        }

        let key = CacheKey::new(city, self.units, self.lang);
        if let Some(hit) = self.cache.get_forecast(&key) {
            tracing::debug!("Forecast for {} served from cache", city);
            return Ok((hit, true));
        }

        let url = format!("{}/forecast", self.base_url);
        let raw: ForecastResponse = self.get_json(&url, city).await?;
        let daily = summarize(&raw.list, self.lang);

        self.cache.put_forecast(key, daily.clone());
        Ok((daily, false))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        city: &str,
    ) -> Result<T, WeatherError> {
        let response = self
            .client
            .get(url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", self.units.as_query()),
                ("lang", self.lang.as_query()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .ok()
                .and_then(|body| body.message)
                .unwrap_or(text);
            tracing::debug!("Weather request failed with {}: {}", status, message);
            return Err(WeatherError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}
