//! Event study: price returns in the days after large whale movements.
//!
//! Whale events and price samples rarely share exact timestamps, so both
//! the entry and the exit price are matched within a tolerance window.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use whale_stats_core::{FlowDirection, PricePoint, WhaleEvent};

use crate::common::round_to;

/// Maximum distance between an event and its entry price sample.
pub const ENTRY_TOLERANCE_MS: i64 = 60 * 60 * 1000;
/// Maximum distance between the target exit time and its price sample.
pub const EXIT_TOLERANCE_MS: i64 = 24 * 60 * 60 * 1000;

/// Aggregated returns for one post-event horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventStudyResult {
    pub days_after: u32,
    /// Mean percent return over matched events, rounded to 2 decimals
    pub avg_return_pct: f64,
    pub positive_count: usize,
    pub negative_count: usize,
    /// Number of events for which both entry and exit prices were found
    pub total_events: usize,
}

/// Event-study results computed separately for exchange inflows and outflows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionalEventStudy {
    pub inflow: Vec<EventStudyResult>,
    pub outflow: Vec<EventStudyResult>,
}

#[derive(Debug, Default)]
struct ReturnAccumulator {
    sum: f64,
    positive: usize,
    negative: usize,
    valid: usize,
}

impl ReturnAccumulator {
    fn add(&mut self, return_pct: f64) {
        self.sum += return_pct;
        self.valid += 1;
        if return_pct > 0.0 {
            self.positive += 1;
        } else if return_pct < 0.0 {
            self.negative += 1;
        }
    }

    fn finish(self, days_after: u32) -> EventStudyResult {
        let avg = if self.valid > 0 {
            round_to(self.sum / self.valid as f64, 2)
        } else {
            0.0
        };

        EventStudyResult {
            days_after,
            avg_return_pct: avg,
            positive_count: self.positive,
            negative_count: self.negative,
            total_events: self.valid,
        }
    }
}

/// Measures the percent price return `d` days after each whale event, for
/// every `d` in `days_after_list`.
///
/// The entry price is the first sample within one hour of the event; the
/// exit price is the first sample within one day of `event + d days`.
/// Events without both prices (or with a zero entry price) are skipped and
/// do not count toward `total_events`. Results follow the order of
/// `days_after_list`.
#[must_use]
pub fn event_study(
    events: &[WhaleEvent],
    prices: &[PricePoint],
    days_after_list: &[u32],
) -> Vec<EventStudyResult> {
    days_after_list
        .iter()
        .map(|&days| {
            let mut acc = ReturnAccumulator::default();
            for event in events {
                if let Some(return_pct) = event_return(event, prices, days) {
                    acc.add(return_pct);
                }
            }

            tracing::debug!(
                days,
                matched = acc.valid,
                skipped = events.len() - acc.valid,
                "event study horizon complete"
            );
            acc.finish(days)
        })
        .collect()
}

/// Runs [`event_study`] separately over inflow and outflow events.
#[must_use]
pub fn event_study_by_direction(
    events: &[WhaleEvent],
    prices: &[PricePoint],
    days_after_list: &[u32],
) -> DirectionalEventStudy {
    let (inflows, outflows): (Vec<WhaleEvent>, Vec<WhaleEvent>) = events
        .iter()
        .copied()
        .partition(|e| e.direction == FlowDirection::Inflow);

    DirectionalEventStudy {
        inflow: event_study(&inflows, prices, days_after_list),
        outflow: event_study(&outflows, prices, days_after_list),
    }
}

fn event_return(event: &WhaleEvent, prices: &[PricePoint], days: u32) -> Option<f64> {
    let entry = find_price_near(prices, event.timestamp, ENTRY_TOLERANCE_MS)?;
    let target = event.timestamp + Duration::days(i64::from(days));
    let exit = find_price_near(prices, target, EXIT_TOLERANCE_MS)?;

    if entry.price == 0.0 {
        tracing::trace!(timestamp = %event.timestamp, "skipping event with zero entry price");
        return None;
    }

    Some((exit.price - entry.price) / entry.price * 100.0)
}

/// First price sample strictly closer than `tolerance_ms` to `target`.
fn find_price_near(
    prices: &[PricePoint],
    target: DateTime<Utc>,
    tolerance_ms: i64,
) -> Option<&PricePoint> {
    prices
        .iter()
        .find(|p| (p.timestamp - target).num_milliseconds().abs() < tolerance_ms)
}
