//! Token symbol lookups for ERC-20 contracts and price-feed asset ids.

/// Known ERC-20 contracts (lowercase) and their token symbols.
pub const CONTRACT_TOKENS: &[(&str, &str)] = &[
    ("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48", "USDC"),
    ("0xdac17f958d2ee523a2206206994597c13d831ec7", "USDT"),
    ("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2", "WETH"),
    ("0x2260fac5e5542a773aa44fbcfedf7c193bc2c599", "WBTC"),
];

/// Price-feed asset ids and their token symbols.
pub const ASSET_TOKENS: &[(&str, &str)] = &[
    ("usd-coin", "USDC"),
    ("tether", "USDT"),
    ("ethereum", "ETH"),
    ("bitcoin", "BTC"),
];

/// Exchange hot wallets (lowercase) tracked for inflow/outflow classification.
pub const EXCHANGE_WALLETS: &[(&str, &str)] = &[
    ("0x742d35cc6634c0532925a3b844bc454e4438f44e", "Bitfinex"),
    ("0x56eddb7aa87536c09ccc2793473599fd21a8b17f", "Binance"),
    ("0x4e83362442b8d1bec281594cea3050c8eb01311c", "Coinbase"),
];

pub const STABLECOINS: &[&str] = &["USDT", "USDC"];

pub const UNKNOWN_TOKEN: &str = "UNKNOWN";

/// Resolves a contract address to its token symbol, case-insensitively.
#[must_use]
pub fn token_for_contract(contract_address: &str) -> Option<&'static str> {
    let address = contract_address.to_lowercase();
    CONTRACT_TOKENS
        .iter()
        .find(|(contract, _)| *contract == address)
        .map(|(_, token)| *token)
}

#[must_use]
pub fn token_for_asset(asset_id: &str) -> Option<&'static str> {
    ASSET_TOKENS
        .iter()
        .find(|(asset, _)| asset.eq_ignore_ascii_case(asset_id))
        .map(|(_, token)| *token)
}

/// Maps a token symbol (wrapped or native) to its price-feed asset id.
#[must_use]
pub fn asset_for_token(token: &str) -> Option<&'static str> {
    match token.to_uppercase().as_str() {
        "USDC" => Some("usd-coin"),
        "USDT" => Some("tether"),
        "WETH" | "ETH" => Some("ethereum"),
        "WBTC" | "BTC" => Some("bitcoin"),
        _ => None,
    }
}

/// Name of the exchange owning `address`, if it is a tracked wallet.
#[must_use]
pub fn exchange_for_wallet(address: &str) -> Option<&'static str> {
    EXCHANGE_WALLETS
        .iter()
        .find(|(wallet, _)| wallet.eq_ignore_ascii_case(address))
        .map(|(_, exchange)| *exchange)
}

#[must_use]
pub fn is_stablecoin(token: &str) -> bool {
    STABLECOINS.iter().any(|s| s.eq_ignore_ascii_case(token))
}
