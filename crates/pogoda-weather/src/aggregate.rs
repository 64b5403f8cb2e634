//! Daily forecast aggregation.
//!
//! Collapses an ordered run of hourly samples into one [`DailySummary`] per
//! local calendar day.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use pogoda_core::ForecastConfig;
use std::collections::HashMap;

use crate::types::{DailySummary, ForecastBundle, HourlySample};

pub const DEFAULT_MAX_DAYS: usize = 10;

/// Groups hourly samples into at most `max_days` daily summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyAggregator {
    max_days: usize,
    utc_offset: FixedOffset,
}

/// Same limits as a default [`ForecastConfig`].
impl Default for DailyAggregator {
    fn default() -> Self {
        Self::from_config(&ForecastConfig::default())
    }
}

impl DailyAggregator {
    pub fn new(max_days: usize, utc_offset: FixedOffset) -> Self {
        Self {
            max_days,
            utc_offset,
        }
    }

    /// Build from config. An unrepresentable offset falls back to UTC.
    pub fn from_config(config: &ForecastConfig) -> Self {
        let utc_offset = config
            .utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| {
                tracing::warn!(
                    "Ignoring out-of-range UTC offset of {} minutes",
                    config.utc_offset_minutes
                );
                Utc.fix()
            });

        Self::new(config.max_days, utc_offset)
    }

    pub fn max_days(&self) -> usize {
        self.max_days
    }

    pub fn utc_offset(&self) -> FixedOffset {
        self.utc_offset
    }

    /// Summarize `samples` using the configured offset.
    ///
    /// Samples must already be in ascending timestamp order. They are never
    /// re-sorted, because order decides which sample represents a day.
    pub fn aggregate(&self, samples: &[HourlySample]) -> Vec<DailySummary> {
        aggregate_daily(samples, self.utc_offset, self.max_days)
    }

    /// Summarize a forecast, preferring the timezone the provider reported.
    pub fn aggregate_bundle(&self, bundle: &ForecastBundle) -> Vec<DailySummary> {
        let offset = bundle
            .timezone
            .and_then(FixedOffset::east_opt)
            .unwrap_or(self.utc_offset);

        aggregate_daily(&bundle.forecast, offset, self.max_days)
    }
}

/// Group samples by local date and summarize the first `max_days` dates.
///
/// Dates keep first-seen order and each day's samples keep input order.
/// Timestamps outside chrono's range are skipped.
pub fn aggregate_daily(
    samples: &[HourlySample],
    offset: FixedOffset,
    max_days: usize,
) -> Vec<DailySummary> {
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();
    let mut days: Vec<(NaiveDate, Vec<&HourlySample>)> = Vec::new();

    for sample in samples {
        let Some(time) = DateTime::from_timestamp(sample.timestamp, 0) else {
            continue;
        };
        let date = time.with_timezone(&offset).date_naive();

        let slot = *index.entry(date).or_insert_with(|| {
            days.push((date, Vec::new()));
            days.len() - 1
        });
        days[slot].1.push(sample);
    }

    days.into_iter()
        .take(max_days)
        .map(|(date, day)| summarize(date, &day))
        .collect()
}

// `day` is never empty: a date is only recorded together with its first sample.
fn summarize(date: NaiveDate, day: &[&HourlySample]) -> DailySummary {
    let representative = day[day.len() / 2];

    let (temperature_min, temperature_max) = day.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(min, max), s| (min.min(s.temperature), max.max(s.temperature)),
    );

    let pop_max = day
        .iter()
        .map(|s| s.precipitation_probability)
        .fold(0.0_f64, f64::max);

    DailySummary {
        date,
        temperature_max,
        temperature_min,
        representative_condition_code: representative.condition_code.clone(),
        representative_description: representative.description.clone(),
        precipitation_probability_max: (pop_max * 100.0).round().clamp(0.0, 100.0) as u8,
        sample_count: day.len(),
    }
}
