//! Provider clients for the asset catalog (CoinMarketCap) and for news
//! listings and prices (CryptoCompare).

pub mod coinmarketcap;
pub mod cryptocompare;
pub mod transport;

pub use coinmarketcap::CoinMarketCapClient;
pub use cryptocompare::CryptoCompareClient;
pub use transport::{HttpTransport, RateLimiter};
