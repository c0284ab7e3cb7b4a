//! Forecast samples and the per-weekday summary built from them

use chrono::{NaiveDate, NaiveDateTime};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One forecast sample at a fixed future instant (provider-local calendar time)
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
    pub time: NaiveDateTime,
    /// Temperature in Celsius
    pub temperature: f64,
}

impl ForecastEntry {
    #[must_use]
    pub fn new(time: NaiveDateTime, temperature: f64) -> Self {
        Self { time, temperature }
    }

    /// Calendar date the sample falls on
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.time.date()
    }

    /// English weekday name of the sample's date
    #[must_use]
    pub fn weekday_name(&self) -> String {
        self.date().format("%A").to_string()
    }
}

/// Round to one decimal place, halves rounding up (towards positive infinity)
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

/// Weekday name to representative temperature, in first-seen order.
///
/// Each weekday keeps the first sample encountered for it; today's weekday
/// is never present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyForecastSummary {
    days: Vec<(String, f64)>,
}

impl DailyForecastSummary {
    /// Scan samples in provider order and drop the entry for `today`
    #[must_use]
    pub fn from_entries(entries: &[ForecastEntry], today: &str) -> Self {
        let mut days: Vec<(String, f64)> = Vec::new();

        for entry in entries {
            let day = entry.weekday_name();
            if days.iter().any(|(seen, _)| *seen == day) {
                continue;
            }
            days.push((day, round_to_tenth(entry.temperature)));
        }

        days.retain(|(day, _)| day != today);
        Self { days }
    }

    #[must_use]
    pub fn get(&self, day: &str) -> Option<f64> {
        self.days
            .iter()
            .find(|(name, _)| name == day)
            .map(|(_, temp)| *temp)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.days.iter().map(|(day, temp)| (day.as_str(), *temp))
    }
}

impl Serialize for DailyForecastSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.days.len()))?;
        for (day, temp) in &self.days {
            map.serialize_entry(day, temp)?;
        }
        map.end()
    }
}
