//! Seeded synthetic whale and price data for demos and tests.
//!
//! Prices follow an hourly multiplicative random walk. Transfers are drawn
//! per day from a fixed wallet pool plus the known exchange wallets, with
//! occasional spikes so anomaly detection has something to find.

use chrono::{DateTime, Duration, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use whale_stats_core::{tokens, ExchangeFlow, PricePoint, WhaleTransfer};

pub const STARTING_PRICE: f64 = 3_000.0;
pub const WALLET_POOL_SIZE: usize = 40;
pub const MAX_TRANSFERS_PER_DAY: u32 = 12;

const HOURLY_VOLATILITY: f64 = 0.01;
const SPIKE_PROBABILITY: f64 = 0.05;
const EXCHANGE_LEG_PROBABILITY: f64 = 0.3;

/// A generated dataset covering `days` consecutive days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticData {
    pub transfers: Vec<WhaleTransfer>,
    pub prices: Vec<PricePoint>,
    pub flows: Vec<ExchangeFlow>,
}

impl SyntheticData {
    /// Generates a dataset starting at `start`.
    ///
    /// The same `seed` always yields the same data; `None` draws from entropy.
    #[must_use]
    pub fn generate(seed: Option<u64>, days: u32, start: DateTime<Utc>) -> Self {
        let mut rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let wallets: Vec<String> = (0..WALLET_POOL_SIZE)
            .map(|i| format!("0x{:040x}", 0xa11ce_u64 + i as u64))
            .collect();

        let prices = generate_prices(&mut rng, days, start);
        let transfers = generate_transfers(&mut rng, days, start, &wallets);
        let flows = generate_flows(&mut rng, days, start);

        tracing::info!(
            days,
            prices = prices.len(),
            transfers = transfers.len(),
            flows = flows.len(),
            "generated synthetic dataset"
        );

        Self {
            transfers,
            prices,
            flows,
        }
    }
}

fn generate_prices(rng: &mut ChaCha8Rng, days: u32, start: DateTime<Utc>) -> Vec<PricePoint> {
    let hours = i64::from(days) * 24;
    let mut price = STARTING_PRICE;

    (0..hours)
        .map(|hour| {
            let point = PricePoint::new(start + Duration::hours(hour), price);
            let step = rng.gen_range(-HOURLY_VOLATILITY..HOURLY_VOLATILITY);
            price = (price * (1.0 + step)).max(1.0);
            point
        })
        .collect()
}

fn generate_transfers(
    rng: &mut ChaCha8Rng,
    days: u32,
    start: DateTime<Utc>,
    wallets: &[String],
) -> Vec<WhaleTransfer> {
    let mut transfers = Vec::new();

    for day in 0..i64::from(days) {
        let count = rng.gen_range(0..=MAX_TRANSFERS_PER_DAY);
        for n in 0..count {
            let hour = rng.gen_range(0..24);
            let mut amount = rng.gen_range(100.0..5_000.0);
            if rng.gen_bool(SPIKE_PROBABILITY) {
                amount *= rng.gen_range(20.0..50.0);
            }

            let whale = wallets[rng.gen_range(0..wallets.len())].clone();
            let exchange = tokens::EXCHANGE_WALLETS[rng.gen_range(0..tokens::EXCHANGE_WALLETS.len())]
                .0
                .to_string();
            let roll: f64 = rng.gen();
            let (from_address, to_address) = if roll < EXCHANGE_LEG_PROBABILITY {
                (whale, exchange)
            } else if roll < 2.0 * EXCHANGE_LEG_PROBABILITY {
                (exchange, whale)
            } else {
                (whale, wallets[rng.gen_range(0..wallets.len())].clone())
            };

            transfers.push(WhaleTransfer {
                timestamp: start + Duration::days(day) + Duration::hours(hour),
                tx_hash: format!("0x{day:08x}{n:04x}{:016x}", rng.gen::<u64>()),
                from_address,
                to_address,
                amount,
                token: "ETH".to_string(),
            });
        }
    }

    transfers.sort_by_key(|t| t.timestamp);
    transfers
}

fn generate_flows(rng: &mut ChaCha8Rng, days: u32, start: DateTime<Utc>) -> Vec<ExchangeFlow> {
    let weeks = i64::from(days.div_ceil(7));
    let mut flows = Vec::new();

    for week in 0..weeks {
        let week_start = start + Duration::weeks(week);
        for (_, exchange) in tokens::EXCHANGE_WALLETS {
            for (contract, _) in tokens::CONTRACT_TOKENS {
                flows.push(ExchangeFlow {
                    exchange: (*exchange).to_string(),
                    week_start,
                    inflow: rng.gen_range(0.0..2_000_000.0),
                    outflow: rng.gen_range(0.0..2_000_000.0),
                    contract_address: (*contract).to_string(),
                });
            }
        }
    }

    flows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn same_seed_same_data() {
        let a = SyntheticData::generate(Some(42), 30, start());
        let b = SyntheticData::generate(Some(42), 30, start());
        assert_eq!(a, b);

        let c = SyntheticData::generate(Some(43), 30, start());
        assert_ne!(a.prices, c.prices);
    }

    #[test]
    fn hourly_prices_cover_every_day() {
        let data = SyntheticData::generate(Some(7), 10, start());

        assert_eq!(data.prices.len(), 240);
        assert_eq!(data.prices[0].price, STARTING_PRICE);
        assert!(data.prices.iter().all(|p| p.price >= 1.0));
        assert!(data
            .prices
            .windows(2)
            .all(|w| w[1].timestamp - w[0].timestamp == Duration::hours(1)));
    }

    #[test]
    fn transfers_are_sorted_and_in_range() {
        let data = SyntheticData::generate(Some(11), 20, start());
        let end = start() + Duration::days(20);

        assert!(data.transfers.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        assert!(data
            .transfers
            .iter()
            .all(|t| t.timestamp >= start() && t.timestamp < end && t.amount >= 100.0));
        assert!(data.transfers.len() <= 20 * MAX_TRANSFERS_PER_DAY as usize);
    }

    #[test]
    fn weekly_flows_per_exchange_and_contract() {
        let data = SyntheticData::generate(Some(3), 15, start());
        let per_week = tokens::EXCHANGE_WALLETS.len() * tokens::CONTRACT_TOKENS.len();

        assert_eq!(data.flows.len(), 3 * per_week);
        assert_eq!(data.flows[per_week].week_start, start() + Duration::weeks(1));
    }

    #[test]
    fn zero_days_is_empty() {
        let data = SyntheticData::generate(Some(1), 0, start());
        assert!(data.prices.is_empty());
        assert!(data.transfers.is_empty());
        assert!(data.flows.is_empty());
    }
}
