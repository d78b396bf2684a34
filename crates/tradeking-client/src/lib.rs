//! OAuth1-signed REST client for the TradeKing brokerage API.
//!
//! The client stores one immutable OAuth credential set, signs every
//! request with HMAC-SHA1 per RFC 5849, and decodes JSON response bodies.
//! Resources are grouped into explicit structs — [`market::MarketApi`],
//! [`news::NewsApi`], [`options::OptionsApi`], [`account::AccountApi`] —
//! all sharing one dispatcher. There is no default or global instance;
//! construct a [`TradeKing`] and pass it to whatever needs it.
//!
//! ```no_run
//! use tradeking_client::{ClientConfig, Credentials, TradeKing};
//!
//! # async fn run() -> tradeking_core::error::ApiResult<()> {
//! let credentials = Credentials::new("ckey", "csecret", "otoken", "osecret")?;
//! let client = TradeKing::new(ClientConfig::new(credentials))?;
//! let quotes = client.market().quotes(&["IBM"], None).await?;
//! println!("{quotes}");
//! # Ok(())
//! # }
//! ```
//!
//! The remote API rate-limits aggressively and paginates some listings;
//! neither is handled here — non-2xx statuses (including 429) surface as
//! [`ApiError::Request`] and callers own any retry policy.

pub mod account;
pub mod client;
pub mod config;
pub mod market;
pub mod news;
pub mod oauth;
pub mod options;
mod transport;

pub use client::TradeKing;
pub use config::{load_config, ClientConfig, Credentials, DEFAULT_BASE_URL};
pub use tradeking_core::error::{ApiError, ApiResult};
