//! Calendar-day aggregation and the whale/price join.
//!
//! Rolling correlation expects one sample per day with whale volume and
//! price already aligned; these helpers build that series from raw
//! transfers and an irregular price feed.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::collections::BTreeMap;
use whale_stats_core::{
    FlowDirection, PricePoint, TimestampedAmount, TimestampedObservation, WhaleEvent,
    WhaleTransfer,
};

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Sums amounts per UTC calendar day, oldest day first.
///
/// Each output sample is stamped at midnight UTC.
#[must_use]
pub fn daily_totals(amounts: &[TimestampedAmount]) -> Vec<TimestampedAmount> {
    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for sample in amounts {
        *by_day.entry(sample.timestamp.date_naive()).or_insert(0.0) += sample.amount;
    }

    by_day
        .into_iter()
        .map(|(date, amount)| TimestampedAmount::new(start_of_day(date), amount))
        .collect()
}

/// Daily whale volume from raw transfers.
#[must_use]
pub fn daily_transfer_totals(transfers: &[WhaleTransfer]) -> Vec<TimestampedAmount> {
    let amounts: Vec<TimestampedAmount> = transfers.iter().map(TimestampedAmount::from).collect();
    daily_totals(&amounts)
}

/// Joins daily whale volume onto a price series by calendar day.
///
/// Produces one observation per day that has a price, using the latest
/// price sample of that day. Days without whale activity get a whale
/// amount of 0; whale days without a price are dropped. Output is sorted
/// ascending by date.
#[must_use]
pub fn merge_daily(
    whale_amounts: &[TimestampedAmount],
    prices: &[PricePoint],
) -> Vec<TimestampedObservation> {
    let mut closes: BTreeMap<NaiveDate, PricePoint> = BTreeMap::new();
    for point in prices {
        closes
            .entry(point.timestamp.date_naive())
            .and_modify(|existing| {
                if point.timestamp >= existing.timestamp {
                    *existing = *point;
                }
            })
            .or_insert(*point);
    }

    let whale_by_day: BTreeMap<NaiveDate, f64> = daily_totals(whale_amounts)
        .into_iter()
        .map(|d| (d.timestamp.date_naive(), d.amount))
        .collect();

    let merged: Vec<TimestampedObservation> = closes
        .into_iter()
        .map(|(date, close)| {
            let whale_amount = whale_by_day.get(&date).copied().unwrap_or(0.0);
            TimestampedObservation::new(start_of_day(date), whale_amount, close.price)
        })
        .collect();

    tracing::debug!(
        price_days = merged.len(),
        whale_days = whale_by_day.len(),
        "merged whale activity onto prices"
    );
    merged
}

/// Derives whale events from transfers touching known exchange wallets.
///
/// A transfer of at least `min_amount` into an exchange wallet is an
/// inflow; one out of an exchange wallet is an outflow. Transfers that
/// touch no exchange, or move between two exchange wallets, are skipped.
#[must_use]
pub fn events_from_transfers(
    transfers: &[WhaleTransfer],
    min_amount: f64,
    exchange_wallets: &[String],
) -> Vec<WhaleEvent> {
    let is_exchange = |address: &str| {
        exchange_wallets
            .iter()
            .any(|wallet| wallet.eq_ignore_ascii_case(address))
    };

    let mut events: Vec<WhaleEvent> = transfers
        .iter()
        .filter(|t| t.amount >= min_amount)
        .filter_map(|t| {
            let direction = match (is_exchange(&t.from_address), is_exchange(&t.to_address)) {
                (false, true) => FlowDirection::Inflow,
                (true, false) => FlowDirection::Outflow,
                _ => return None,
            };
            Some(WhaleEvent {
                timestamp: t.timestamp,
                amount: t.amount,
                direction,
            })
        })
        .collect();

    events.sort_by_key(|e| e.timestamp);
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, day, hour, 0, 0).unwrap()
    }

    fn transfer(day: u32, hour: u32, from: &str, to: &str, amount: f64) -> WhaleTransfer {
        WhaleTransfer {
            timestamp: at(day, hour),
            tx_hash: format!("0x{day:02}{hour:02}"),
            from_address: from.to_string(),
            to_address: to.to_string(),
            amount,
            token: "ETH".to_string(),
        }
    }

    #[test]
    fn daily_totals_sum_within_day() {
        let amounts = vec![
            TimestampedAmount::new(at(2, 9), 10.0),
            TimestampedAmount::new(at(1, 23), 5.0),
            TimestampedAmount::new(at(2, 18), 15.0),
        ];

        let totals = daily_totals(&amounts);

        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0], TimestampedAmount::new(at(1, 0), 5.0));
        assert_eq!(totals[1], TimestampedAmount::new(at(2, 0), 25.0));
    }

    #[test]
    fn merge_defaults_missing_whale_days_to_zero() {
        let whale = vec![
            TimestampedAmount::new(at(1, 4), 100.0),
            TimestampedAmount::new(at(3, 12), 300.0),
            // no price on day 9: dropped
            TimestampedAmount::new(at(9, 12), 900.0),
        ];
        let prices = vec![
            PricePoint::new(at(1, 0), 10.0),
            PricePoint::new(at(2, 0), 20.0),
            PricePoint::new(at(3, 0), 30.0),
        ];

        let merged = merge_daily(&whale, &prices);

        let rows: Vec<(f64, f64)> = merged.iter().map(|o| (o.whale_amount, o.price)).collect();
        assert_eq!(rows, vec![(100.0, 10.0), (0.0, 20.0), (300.0, 30.0)]);
        assert_eq!(merged[1].timestamp, at(2, 0));
    }

    #[test]
    fn merge_uses_latest_price_of_the_day() {
        let prices = vec![
            PricePoint::new(at(1, 20), 12.0),
            PricePoint::new(at(1, 8), 11.0),
            PricePoint::new(at(1, 23), 13.0),
        ];

        let merged = merge_daily(&[], &prices);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].price, 13.0);
        assert_eq!(merged[0].whale_amount, 0.0);
    }

    #[test]
    fn events_classify_direction_by_exchange_wallet() {
        let exchange = "0xEXCHANGE".to_string();
        let transfers = vec![
            transfer(2, 0, "0xwhale", "0xexchange", 5_000.0),
            transfer(1, 0, "0xexchange", "0xwhale", 7_000.0),
            transfer(3, 0, "0xwhale", "0xother", 9_000.0),
            transfer(4, 0, "0xwhale", "0xexchange", 10.0),
        ];

        let events = events_from_transfers(&transfers, 1_000.0, &[exchange]);

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].direction, FlowDirection::Outflow);
        assert_eq!(events[0].amount, 7_000.0);
        assert_eq!(events[1].direction, FlowDirection::Inflow);
    }

    #[test]
    fn exchange_to_exchange_moves_are_not_events() {
        let wallets = vec!["0xa".to_string(), "0xb".to_string()];
        let transfers = vec![transfer(1, 0, "0xa", "0xb", 50_000.0)];
        assert!(events_from_transfers(&transfers, 0.0, &wallets).is_empty());
    }
}
