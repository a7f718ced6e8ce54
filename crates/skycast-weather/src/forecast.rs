//! Forecast summarization: reduce the 3-hourly blocks from the forecast
//! endpoint to one entry per day with min/max temperatures, the most
//! frequent description/icon and the mean precipitation probability.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Datelike, NaiveDate};
use serde::Deserialize;

use crate::types::{DailySummary, Lang};

/// Days kept in the summary; the API returns about five.
pub const FORECAST_DAYS: usize = 5;

const WEEKDAYS_ES: [&str; 7] = ["Lun", "Mar", "Mié", "Jue", "Vie", "Sáb", "Dom"];
const WEEKDAYS_EN: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// One 3-hour block as sent by the forecast endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastBlock {
    pub dt: Option<i64>,
    pub dt_txt: Option<String>,
    #[serde(default)]
    pub main: BlockMain,
    #[serde(default)]
    pub weather: Vec<BlockWeather>,
    pub pop: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockMain {
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockWeather {
    pub description: Option<String>,
    pub icon: Option<String>,
}

/// Short localized day label, e.g. "Lun 06".
pub fn day_label(date: NaiveDate, lang: Lang) -> String {
    let names = match lang {
        Lang::Es => WEEKDAYS_ES,
        Lang::En => WEEKDAYS_EN,
    };
    let idx = date.weekday().num_days_from_monday() as usize;
    format!("{} {:02}", names[idx], date.day())
}

/// Reduce raw blocks to at most [`FORECAST_DAYS`] daily summaries.
/// Days with no temperature data are skipped.
pub fn summarize(blocks: &[ForecastBlock], lang: Lang) -> Vec<DailySummary> {
    let mut by_day: BTreeMap<NaiveDate, Vec<&ForecastBlock>> = BTreeMap::new();
    for block in blocks {
        if let Some(date) = block_date(block) {
            by_day.entry(date).or_default().push(block);
        }
    }

    let mut daily = Vec::new();
    for (date, day_blocks) in by_day {
        let mins: Vec<f64> = day_blocks.iter().filter_map(|b| b.main.temp_min).collect();
        let maxs: Vec<f64> = day_blocks.iter().filter_map(|b| b.main.temp_max).collect();
        if mins.is_empty() || maxs.is_empty() {
            continue;
        }

        let pop_sum: f64 = day_blocks.iter().map(|b| b.pop.unwrap_or(0.0)).sum();
        let pop = round2(pop_sum / day_blocks.len() as f64);

        let desc = most_frequent(
            day_blocks
                .iter()
                .filter_map(|b| b.weather.first().and_then(|w| w.description.clone())),
        )
        .unwrap_or_default();
        let icon = most_frequent(
            day_blocks
                .iter()
                .filter_map(|b| b.weather.first().and_then(|w| w.icon.clone())),
        );

        daily.push(DailySummary {
            date,
            label: day_label(date, lang),
            temp_min: round1(mins.iter().copied().fold(f64::INFINITY, f64::min)),
            temp_max: round1(maxs.iter().copied().fold(f64::NEG_INFINITY, f64::max)),
            desc,
            icon,
            pop,
        });
    }

    daily.truncate(FORECAST_DAYS);
    daily
}

// `dt_txt` is 'YYYY-MM-DD HH:MM:SS'; fall back to the epoch field.
fn block_date(block: &ForecastBlock) -> Option<NaiveDate> {
    if let Some(txt) = &block.dt_txt {
        if let Some(day) = txt.get(..10) {
            if let Ok(date) = NaiveDate::parse_from_str(day, "%Y-%m-%d") {
                return Some(date);
            }
        }
    }
    Some(DateTime::from_timestamp(block.dt?, 0)?.date_naive())
}

/// Most frequent non-empty item; ties resolve to the one seen first.
fn most_frequent<I: IntoIterator<Item = String>>(items: I) -> Option<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();
    for item in items {
        if item.is_empty() {
            continue;
        }
        let count = counts.entry(item.clone()).or_insert(0);
        if *count == 0 {
            order.push(item);
        }
        *count += 1;
    }

    let mut best: Option<(String, usize)> = None;
    for name in order {
        let count = counts.get(&name).copied().unwrap_or(0);
        if best.as_ref().map_or(true, |(_, c)| count > *c) {
            best = Some((name, count));
        }
    }
    best.map(|(name, _)| name)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
