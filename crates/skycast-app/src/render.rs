//! Plain-text rendering. Everything here is a pure function from data
//! to a string, so the lookup flow stays testable without a terminal.

use std::fmt::Write as _;

use skycast_history::HistoryEntry;
use skycast_weather::{CurrentConditions, DailySummary, Units};

pub fn render_current(conditions: &CurrentConditions, from_cache: bool) -> String {
    let units = conditions.units;
    let mut out = String::new();
    let _ = writeln!(out, "{} - {}", conditions.city, conditions.desc);
    let _ = writeln!(
        out,
        "  Temp {:.1}{} (feels like {:.1}{})",
        conditions.temp,
        units.temp_symbol(),
        conditions.feels_like,
        units.temp_symbol(),
    );
    let _ = writeln!(
        out,
        "  Humidity {}%  |  Pressure {} hPa  |  Wind {:.1} {}",
        conditions.humidity,
        conditions.pressure,
        conditions.wind_speed,
        units.wind_unit(),
    );
    if from_cache {
        let _ = writeln!(out, "  (cached)");
    }
    out
}

pub fn render_forecast(daily: &[DailySummary], units: Units) -> String {
    if daily.is_empty() {
        return "No forecast available".to_string();
    }

    let mut out = String::from("Forecast:\n");
    for day in daily {
        let _ = writeln!(
            out,
            "  {}  {:>6.1}{} / {:>6.1}{}  {}  (rain {:.0}%)",
            day.label,
            day.temp_min,
            units.temp_symbol(),
            day.temp_max,
            units.temp_symbol(),
            day.desc,
            day.pop * 100.0,
        );
    }
    out
}

/// History as a single row of chips, pinned entries marked with a star.
pub fn render_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "History: (empty)".to_string();
    }

    let chips: Vec<String> = entries
        .iter()
        .map(|entry| {
            if entry.pinned {
                format!("[* {}]", entry.name)
            } else {
                format!("[{}]", entry.name)
            }
        })
        .collect();
    format!("History: {}", chips.join(" "))
}
