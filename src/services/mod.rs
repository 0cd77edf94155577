//! External collaborators: price quotes and AI opinions.

pub mod analyst;
pub mod market_data;

pub use analyst::{parse_analysis, ChatAnalyst, MarketAnalyst};
pub use market_data::{coingecko_id, CoinGeckoProvider, PriceProvider};
