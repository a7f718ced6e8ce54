//! In-memory TTL cache for weather responses.
//!
//! Keys carry the request kind implicitly (separate maps), plus the
//! lowercased city and the units/lang pair so variants never collide.
//! Forecast entries hold the summarized form, not the raw body.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::types::{CurrentConditions, DailySummary, Lang, Units};

/// How long a cached response stays fresh.
pub const CACHE_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub city: String,
    pub units: Units,
    pub lang: Lang,
}

impl CacheKey {
    pub fn new(city: &str, units: Units, lang: Lang) -> Self {
        Self {
            city: city.trim().to_lowercase(),
            units,
            lang,
        }
    }
}

#[derive(Debug)]
pub struct ResponseCache {
    ttl: Duration,
    current: Mutex<HashMap<CacheKey, (Instant, CurrentConditions)>>,
    forecast: Mutex<HashMap<CacheKey, (Instant, Vec<DailySummary>)>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            current: Mutex::new(HashMap::new()),
            forecast: Mutex::new(HashMap::new()),
        }
    }

    pub fn get_current(&self, key: &CacheKey) -> Option<CurrentConditions> {
        self.current
            .lock()
            .get(key)
            .filter(|(stored_at, _)| stored_at.elapsed() < self.ttl)
            .map(|(_, value)| value.clone())
    }

    pub fn put_current(&self, key: CacheKey, value: CurrentConditions) {
        self.current.lock().insert(key, (Instant::now(), value));
    }

    pub fn get_forecast(&self, key: &CacheKey) -> Option<Vec<DailySummary>> {
        self.forecast
            .lock()
            .get(key)
            .filter(|(stored_at, _)| stored_at.elapsed() < self.ttl)
            .map(|(_, value)| value.clone())
    }

    pub fn put_forecast(&self, key: CacheKey, value: Vec<DailySummary>) {
        self.forecast.lock().insert(key, (Instant::now(), value));
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(CACHE_TTL)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use crate::types::Units;

    fn conditions(city: &str) -> CurrentConditions {
        CurrentConditions {
            city: city.to_string(),
            temp: 20.0,
            feels_like: 19.0,
            humidity: 50,
            pressure: 1013,
            wind_speed: 3.0,
            desc: "clear".to_string(),
            icon: None,
            units: Units::Metric,
            tz_offset: None,
            observed_at: None,
        }
    }

    #[test]
    fn test_key_normalizes_city() {
        let a = CacheKey::new("  Lima ", Units::Metric, Lang::Es);
        let b = CacheKey::new("lima", Units::Metric, Lang::Es);
        assert_eq!(a, b);
    }

    #[test]
    fn test_key_separates_units_and_lang() {
        let base = CacheKey::new("lima", Units::Metric, Lang::Es);
        assert_ne!(base, CacheKey::new("lima", Units::Imperial, Lang::Es));
        assert_ne!(base, CacheKey::new("lima", Units::Metric, Lang::En));
    }

    #[test]
    fn test_fresh_entry_hits() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        let key = CacheKey::new("lima", Units::Metric, Lang::Es);
        cache.put_current(key.clone(), conditions("Lima, PE"));
        assert_eq!(cache.get_current(&key).unwrap().city, "Lima, PE");
    }

    #[test]
    fn test_expired_entry_misses() {
        let cache = ResponseCache::new(Duration::ZERO);
        let key = CacheKey::new("lima", Units::Metric, Lang::Es);
        cache.put_current(key.clone(), conditions("Lima, PE"));
        assert!(cache.get_current(&key).is_none());
    }

    #[test]
    fn test_current_and_forecast_do_not_collide() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        let key = CacheKey::new("lima", Units::Metric, Lang::Es);
        cache.put_current(key.clone(), conditions("Lima, PE"));
        assert!(cache.get_forecast(&key).is_none());
    }
}
