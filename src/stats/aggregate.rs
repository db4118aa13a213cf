//! Averaged availability aggregation for the daily report mode.
//!
//! Works on pre-aggregated percentage samples, not outage intervals.
//! Hours online/offline are a linear approximation (`pct / 100 * 24`) and
//! may diverge from the exact interval calculation for the same device.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate, TimeZone};

use super::AvailabilitySample;

/// Availability for one calendar day, averaged over that day's samples.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyStat {
    pub date: NaiveDate,
    pub percentage: f64,
    pub hours_online: f64,
    pub hours_offline: f64,
    pub hours_total: f64,
    pub samples: usize,
}

/// Availability over the whole period, averaged over all samples.
#[derive(Debug, Clone, PartialEq)]
pub struct TotalStat {
    pub percentage: f64,
    pub hours_online: f64,
    pub hours_offline: f64,
    pub hours_total: f64,
}

/// Per-day averages over `[start, end]` (both inclusive).
///
/// Every day in the range appears in the result; days with no samples
/// report 0% availability and 24 hours offline. Samples are bucketed by
/// the calendar day of their timestamp in local time.
pub fn daily_stats(
    samples: &[AvailabilitySample],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<DailyStat> {
    let mut days: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();

    let mut day = start;
    while day <= end {
        days.insert(day, (0.0, 0));
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    for sample in samples {
        let date = match Local.timestamp_opt(sample.timestamp, 0).single() {
            Some(dt) => dt.date_naive(),
            None => continue,
        };
        if let Some((sum, count)) = days.get_mut(&date) {
            *sum += sample.percentage;
            *count += 1;
        }
    }

    days.into_iter()
        .map(|(date, (sum, count))| {
            let percentage = if count > 0 { sum / count as f64 } else { 0.0 };
            let hours_online = percentage / 100.0 * 24.0;
            DailyStat {
                date,
                percentage: round2(percentage),
                hours_online: round2(hours_online),
                hours_offline: round2(24.0 - hours_online),
                hours_total: 24.0,
                samples: count,
            }
        })
        .collect()
}

/// Whole-period average over `[start, end]` (both inclusive).
///
/// Zero samples yields an all-offline stat with the period's total hours
/// still reported.
pub fn total_stats(
    samples: &[AvailabilitySample],
    start: NaiveDate,
    end: NaiveDate,
) -> TotalStat {
    let days_total = (end - start).num_days() + 1;
    let hours_total = days_total as f64 * 24.0;

    let percentage = if samples.is_empty() {
        0.0
    } else {
        samples.iter().map(|s| s.percentage).sum::<f64>() / samples.len() as f64
    };

    let hours_online = percentage / 100.0 * hours_total;

    TotalStat {
        percentage: round2(percentage),
        hours_online: round2(hours_online),
        hours_offline: round2(hours_total - hours_online),
        hours_total,
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
