//! Weather retrieval for SkyCast
//!
//! OpenWeather client with a fixed request timeout, an in-memory TTL
//! response cache, 5-day forecast summarization and a cancelable
//! submission session.

pub mod cache;
pub mod client;
pub mod forecast;
pub mod session;
pub mod types;

pub use client::WeatherClient;
pub use forecast::{day_label, FORECAST_DAYS};
pub use session::{SessionEvent, WeatherSession};
pub use types::*;
